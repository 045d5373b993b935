// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Circular boundary ring
//!
//! Doubly linked circular list backed by a slab of index-linked nodes.
//! Concave splitting splices vertices at arbitrary boundary positions and
//! re-walks the boundary near the split, so the ring offers O(1) relinking
//! plus both strict and wrapping positional access. Slab indices replace
//! node pointers; removal keeps the slab dense via swap-remove.

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: usize,
    next: usize,
}

/// Ordered circular container of boundary values.
#[derive(Debug, Clone)]
pub struct Ring<T> {
    nodes: Vec<Node<T>>,
    head: usize,
}

impl<T> Ring<T> {
    /// Create an empty ring
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: 0,
        }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the ring is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reduce any signed index to the canonical `[0, len)` range.
    ///
    /// Returns 0 for an empty ring.
    #[inline]
    pub fn normal_index(&self, index: isize) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        index.rem_euclid(self.nodes.len() as isize) as usize
    }

    /// Slab slot of the node at ring position `pos` (`pos < len`).
    /// Walks forward from the head for the near half, backward otherwise.
    fn slot_at(&self, pos: usize) -> usize {
        let len = self.nodes.len();
        let mut slot = self.head;
        if pos < len / 2 {
            for _ in 0..pos {
                slot = self.nodes[slot].next;
            }
        } else {
            for _ in 0..(len - pos) {
                slot = self.nodes[slot].prev;
            }
        }
        slot
    }

    /// Strict positional access; errors outside `[0, len)`.
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.nodes.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.nodes.len(),
            });
        }
        Ok(&self.nodes[self.slot_at(index)].value)
    }

    /// Strict mutable positional access.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.nodes.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.nodes.len(),
            });
        }
        let slot = self.slot_at(index);
        Ok(&mut self.nodes[slot].value)
    }

    /// Wrapping positional access: out-of-range and negative indices are
    /// normalized modulo the length. Never fails for a non-empty ring.
    ///
    /// # Panics
    /// Panics on an empty ring.
    pub fn get_safe(&self, index: isize) -> &T {
        let pos = self.normal_index(index);
        &self.nodes[self.slot_at(pos)].value
    }

    /// Wrapping mutable positional access.
    ///
    /// # Panics
    /// Panics on an empty ring.
    pub fn get_safe_mut(&mut self, index: isize) -> &mut T {
        let pos = self.normal_index(index);
        let slot = self.slot_at(pos);
        &mut self.nodes[slot].value
    }

    /// Insert `value` immediately after ring position `after`.
    ///
    /// An empty ring accepts `after == 0` as "become the first element";
    /// otherwise `after` must address an existing element.
    pub fn append(&mut self, after: usize, value: T) -> Result<()> {
        if self.nodes.is_empty() {
            if after != 0 {
                return Err(Error::IndexOutOfBounds {
                    index: after,
                    len: 0,
                });
            }
            self.nodes.push(Node {
                value,
                prev: 0,
                next: 0,
            });
            self.head = 0;
            return Ok(());
        }
        if after >= self.nodes.len() {
            return Err(Error::IndexOutOfBounds {
                index: after,
                len: self.nodes.len(),
            });
        }
        let a = self.slot_at(after);
        let n = self.nodes[a].next;
        let idx = self.nodes.len();
        self.nodes.push(Node {
            value,
            prev: a,
            next: n,
        });
        self.nodes[a].next = idx;
        self.nodes[n].prev = idx;
        Ok(())
    }

    /// Insert `value` after the current final element.
    pub fn push_back(&mut self, value: T) {
        if self.nodes.is_empty() {
            self.nodes.push(Node {
                value,
                prev: 0,
                next: 0,
            });
            self.head = 0;
            return;
        }
        let tail = self.nodes[self.head].prev;
        let idx = self.nodes.len();
        self.nodes.push(Node {
            value,
            prev: tail,
            next: self.head,
        });
        self.nodes[tail].next = idx;
        let head = self.head;
        self.nodes[head].prev = idx;
    }

    /// Remove and return the element at ring position `index`,
    /// relinking its neighbors.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.nodes.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.nodes.len(),
            });
        }
        let s = self.slot_at(index);
        let (prev, next) = (self.nodes[s].prev, self.nodes[s].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        if self.head == s {
            self.head = next;
        }

        let last = self.nodes.len() - 1;
        let node = self.nodes.swap_remove(s);
        if s != last {
            // The node that lived at `last` now sits at `s`; every link that
            // addressed `last` must address `s` instead.
            let p = self.nodes[s].prev;
            let p = if p == last { s } else { p };
            let n = self.nodes[s].next;
            let n = if n == last { s } else { n };
            self.nodes[s].prev = p;
            self.nodes[s].next = n;
            self.nodes[p].next = s;
            self.nodes[n].prev = s;
            if self.head == last {
                self.head = s;
            }
        }
        if self.nodes.is_empty() {
            self.head = 0;
        }
        Ok(node.value)
    }

    /// Iterate the ring once, in order, starting at position 0.
    pub fn iter(&self) -> RingIter<'_, T> {
        RingIter {
            ring: self,
            slot: self.head,
            remaining: self.nodes.len(),
        }
    }
}

impl<T: Clone> Ring<T> {
    /// Collect the ring into a `Vec`, in ring order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered borrowing iterator over a [`Ring`].
pub struct RingIter<'a, T> {
    ring: &'a Ring<T>,
    slot: usize,
    remaining: usize,
}

impl<'a, T> Iterator for RingIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.ring.nodes[self.slot];
        self.slot = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a Ring<T> {
    type Item = &'a T;
    type IntoIter = RingIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_of(values: &[i32]) -> Ring<i32> {
        let mut ring = Ring::new();
        for &v in values {
            ring.push_back(v);
        }
        ring
    }

    #[test]
    fn test_push_back_preserves_order() {
        let ring = ring_of(&[10, 20, 30, 40]);
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.to_vec(), vec![10, 20, 30, 40]);
        // the new element becomes the tail, closing the circle
        assert_eq!(*ring.get_safe(-1), 40);
        assert_eq!(*ring.get_safe(4), 10);
    }

    #[test]
    fn test_append_splices_after_position() {
        let mut ring = ring_of(&[1, 2, 4]);
        ring.append(1, 3).unwrap();
        assert_eq!(ring.to_vec(), vec![1, 2, 3, 4]);

        // splice right after the last element wraps the link to the head
        ring.append(3, 5).unwrap();
        assert_eq!(ring.to_vec(), vec![1, 2, 3, 4, 5]);
        assert_eq!(*ring.get_safe(5), 1);
    }

    #[test]
    fn test_append_out_of_range_errors() {
        let mut ring = ring_of(&[1, 2]);
        assert!(matches!(
            ring.append(2, 9),
            Err(Error::IndexOutOfBounds { index: 2, len: 2 })
        ));

        let mut empty: Ring<i32> = Ring::new();
        assert!(empty.append(1, 9).is_err());
        assert!(empty.append(0, 9).is_ok());
        assert_eq!(empty.to_vec(), vec![9]);
    }

    #[test]
    fn test_strict_get_bounds() {
        let ring = ring_of(&[7, 8, 9]);
        assert_eq!(*ring.get(0).unwrap(), 7);
        assert_eq!(*ring.get(2).unwrap(), 9);
        assert!(ring.get(3).is_err());
    }

    #[test]
    fn test_get_safe_wraps_both_directions() {
        let ring = ring_of(&[7, 8, 9]);
        assert_eq!(*ring.get_safe(3), 7);
        assert_eq!(*ring.get_safe(7), 8);
        assert_eq!(*ring.get_safe(-1), 9);
        assert_eq!(*ring.get_safe(-4), 9);
    }

    #[test]
    fn test_normal_index() {
        let ring = ring_of(&[0, 0, 0, 0, 0]);
        assert_eq!(ring.normal_index(0), 0);
        assert_eq!(ring.normal_index(5), 0);
        assert_eq!(ring.normal_index(12), 2);
        assert_eq!(ring.normal_index(-2), 3);
        assert_eq!(ring.normal_index(-12), 3);
    }

    #[test]
    fn test_remove_relinks_neighbors() {
        let mut ring = ring_of(&[1, 2, 3, 4]);
        assert_eq!(ring.remove(1).unwrap(), 2);
        assert_eq!(ring.to_vec(), vec![1, 3, 4]);
        assert_eq!(*ring.get_safe(-1), 4);

        assert_eq!(ring.remove(0).unwrap(), 1);
        assert_eq!(ring.to_vec(), vec![3, 4]);

        assert_eq!(ring.remove(1).unwrap(), 4);
        assert_eq!(ring.remove(0).unwrap(), 3);
        assert!(ring.is_empty());
        assert!(ring.remove(0).is_err());
    }

    #[test]
    fn test_remove_then_splice_reuses_ring() {
        let mut ring = ring_of(&[1, 2, 3]);
        ring.remove(2).unwrap();
        ring.push_back(30);
        ring.append(0, 15).unwrap();
        assert_eq!(ring.to_vec(), vec![1, 15, 2, 30]);
    }
}
