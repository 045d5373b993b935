// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Simple-polygon decomposition engine
//!
//! [`SimplePolygon`] takes an ordered boundary, splits away concave corners
//! along visibility chords until only convex regions remain, then fan
//! triangulates each region. Triangle indices refer to the engine's output
//! vertex array, which is the input boundary followed by the points
//! synthesized on it during splitting.

use crate::error::{Error, Result};
use crate::line::Line2;
use crate::orient::{self, Orientation};
use crate::rect::Rect2;
use crate::ring::Ring;
use crate::vertex::BoundaryVertex;
use nalgebra::{distance, Point2, Vector2};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

/// Whether a boundary is convex or has at least one concave corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convexity {
    Convex,
    Concave,
    /// Not yet computed
    Unset,
}

/// One convex (or not yet split) piece of the decomposed boundary.
#[derive(Debug, Clone)]
pub struct Region {
    winding: Orientation,
    convexity: Convexity,
    ring: Ring<BoundaryVertex>,
}

impl Region {
    fn from_vertices(winding: Orientation, vertices: Vec<BoundaryVertex>) -> Self {
        let mut ring = Ring::new();
        for v in vertices {
            ring.push_back(v);
        }
        Self {
            winding,
            convexity: Convexity::Unset,
            ring,
        }
    }

    /// Winding this region was assembled with.
    #[inline]
    pub fn winding(&self) -> Orientation {
        self.winding
    }

    #[inline]
    pub fn convexity(&self) -> Convexity {
        self.convexity
    }

    /// Number of boundary vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Boundary coordinates in ring order.
    pub fn points(&self) -> Vec<Point2<f64>> {
        self.ring.iter().map(|v| v.pos).collect()
    }

    /// Boundary coordinates ordered to the requested winding: ring order
    /// when it matches, reversed otherwise.
    pub fn points_ordered(&self, winding: Orientation) -> Vec<Point2<f64>> {
        let mut points = self.points();
        if self.winding != winding {
            points.reverse();
        }
        points
    }

    /// Arithmetic mean of the boundary vertices.
    pub fn centroid(&self) -> Point2<f64> {
        let len = self.ring.len();
        if len == 0 {
            return Point2::origin();
        }
        let sum = self
            .ring
            .iter()
            .fold(Vector2::zeros(), |acc, v| acc + v.pos.coords);
        Point2::from(sum / len as f64)
    }

    /// Axis-aligned bounds of the boundary.
    pub fn bounds(&self) -> Option<Rect2> {
        Rect2::from_points(&self.points())
    }

    /// Area of the region by triangle fan from vertex 0.
    pub fn area(&self) -> f64 {
        let len = self.ring.len();
        if len < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        for idx in 1..len - 1 {
            let a = self.ring.get_safe(0).pos;
            let b = self.ring.get_safe(idx as isize).pos;
            let c = self.ring.get_safe(idx as isize + 1).pos;
            area += (orient::cross2(b - a, c - a) * 0.5).abs();
        }
        area
    }

    /// True when the boundary has exactly four vertices meeting at right
    /// angles. Collinear vertices are not ignored; prune them first if
    /// they may be present.
    pub fn is_axis_aligned_rect(&self) -> bool {
        if self.ring.len() != 4 {
            return false;
        }
        let p = self.points();
        let edges = [p[1] - p[0], p[2] - p[1], p[3] - p[2], p[0] - p[3]];
        (0..4).all(|i| orient::dot2(edges[i], edges[(i + 1) % 4]) == 0.0)
    }

    /// Classify every vertex against its ring neighbors, caching the turn,
    /// and derive convexity from the cached turns.
    fn compute_convexity(&mut self) {
        let len = self.ring.len();
        let mut convexity = Convexity::Convex;
        for i in 0..len {
            let prev = self.ring.get_safe(i as isize - 1).pos;
            let next = self.ring.get_safe(i as isize + 1).pos;
            let turn = self.ring.get_safe_mut(i as isize).set_turn(prev, next);
            if turn != Orientation::Collinear && turn != self.winding {
                convexity = Convexity::Concave;
            }
        }
        self.convexity = convexity;
    }

    /// Drop vertices whose cached turn is collinear.
    fn prune_collinear(&mut self) -> Result<()> {
        let mut index = 0;
        while index < self.ring.len() {
            if self.ring.get(index)?.turn == Orientation::Collinear {
                self.ring.remove(index)?;
            } else {
                index += 1;
            }
        }
        Ok(())
    }
}

/// Convex decomposition and fan triangulation of a simple polygon.
///
/// Construct with the boundary in order, call [`execute`](Self::execute),
/// then read triangles, UVs, areas and regions from the accessors.
#[derive(Debug, Clone)]
pub struct SimplePolygon {
    winding: Orientation,
    convexity: Convexity,
    /// Input boundary followed by synthesized split points.
    vertices: Vec<Point2<f64>>,
    regions: Vec<Region>,
    triangles: Vec<[BoundaryVertex; 3]>,
    split_points: Vec<Point2<f64>>,
    area: f64,
}

impl SimplePolygon {
    /// Build the boundary ring and determine the winding.
    ///
    /// Winding is read off the turns at the vertices visited from highest
    /// y downward; the last non-collinear turn decides. A fully collinear
    /// boundary keeps the clockwise default.
    pub fn new(points: &[Point2<f64>]) -> Result<Self> {
        if points.len() < 3 {
            return Err(Error::InvalidPolygon(format!(
                "need at least 3 vertices, got {}",
                points.len()
            )));
        }
        let mut ring = Ring::new();
        for (i, p) in points.iter().enumerate() {
            ring.push_back(BoundaryVertex::new(*p, i));
        }

        let n = points.len();
        let mut order: Vec<usize> = (0..n).collect();
        for i in 0..n - 1 {
            for j in (i + 1)..n {
                if points[order[j]].y > points[order[i]].y {
                    order.swap(i, j);
                }
            }
        }
        let mut winding = Orientation::Clockwise;
        for &idx in &order {
            let prev = ring.get_safe(idx as isize - 1).pos;
            let here = ring.get_safe(idx as isize).pos;
            let next = ring.get_safe(idx as isize + 1).pos;
            let turn = orient::classify(prev, here, next);
            if turn != Orientation::Collinear {
                winding = turn;
            }
        }

        Ok(Self {
            winding,
            convexity: Convexity::Unset,
            vertices: points.to_vec(),
            regions: vec![Region {
                winding,
                convexity: Convexity::Unset,
                ring,
            }],
            triangles: Vec::new(),
            split_points: Vec::new(),
            area: 0.0,
        })
    }

    /// Run classification, concave splitting and triangulation.
    pub fn execute(&mut self) -> Result<()> {
        self.execute_with(|_| {})
    }

    /// Like [`execute`](Self::execute), invoking `sink` for every point
    /// synthesized on the boundary while splitting.
    pub fn execute_with<F: FnMut(Point2<f64>)>(&mut self, mut sink: F) -> Result<()> {
        self.classify();
        self.split_concave(&mut sink)?;
        self.triangulate();
        Ok(())
    }

    /// Winding of the input boundary.
    #[inline]
    pub fn winding(&self) -> Orientation {
        self.winding
    }

    /// Convexity of the input boundary, available after
    /// [`execute`](Self::execute).
    #[inline]
    pub fn convexity(&self) -> Convexity {
        self.convexity
    }

    /// Total area, accumulated over all fan triangles.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Output vertex array: the input boundary followed by split points.
    #[inline]
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// Points synthesized on the boundary during splitting, in creation
    /// order.
    #[inline]
    pub fn split_points(&self) -> &[Point2<f64>] {
        &self.split_points
    }

    /// Convex regions produced by splitting.
    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Triangle indices into [`vertices`](Self::vertices), three per
    /// triangle. `reverse` flips the emitted corner order; a
    /// counter-clockwise boundary flips it once more so front faces come
    /// out consistent either way the boundary was wound.
    pub fn triangles(&self, reverse: bool) -> Vec<u32> {
        let reverse = if self.winding == Orientation::CounterClockwise {
            !reverse
        } else {
            reverse
        };
        let mut indices = Vec::with_capacity(self.triangles.len() * 3);
        for [a, b, c] in &self.triangles {
            if reverse {
                indices.extend_from_slice(&[a.index as u32, c.index as u32, b.index as u32]);
            } else {
                indices.extend_from_slice(&[a.index as u32, b.index as u32, c.index as u32]);
            }
        }
        indices
    }

    /// Texture coordinates for [`vertices`](Self::vertices), normalized to
    /// the boundary's axis-aligned bounds.
    pub fn uvs(&self) -> Vec<Point2<f64>> {
        let Some(bounds) = Rect2::from_points(&self.vertices) else {
            return Vec::new();
        };
        let w = bounds.width();
        let h = bounds.height();
        self.vertices
            .iter()
            .map(|p| Point2::new((p.x - bounds.min.x) / w, (p.y - bounds.min.y) / h))
            .collect()
    }

    /// Centroid of every convex region.
    pub fn centroids(&self) -> Vec<Point2<f64>> {
        self.regions.iter().map(Region::centroid).collect()
    }

    /// Axis-aligned bounds of every convex region.
    pub fn bound_rects(&self) -> Vec<Rect2> {
        self.regions.iter().filter_map(Region::bounds).collect()
    }

    /// The single largest convex region over both traversal orders of the
    /// boundary, collinear vertices pruned.
    pub fn max_area_region(points: &[Point2<f64>]) -> Result<Region> {
        let mut regions = Self::max_area_regions(points)?;
        Ok(regions.swap_remove(0))
    }

    /// Convex regions of the traversal order whose largest region wins,
    /// that region first. The remaining regions are kept only when they
    /// are rectangles after pruning collinear vertices.
    pub fn max_area_regions(points: &[Point2<f64>]) -> Result<Vec<Region>> {
        let forward = Self::decomposed(points)?;
        let reversed_points: Vec<_> = points.iter().rev().copied().collect();
        let reversed = Self::decomposed(&reversed_points)?;

        let (f_index, f_area) = largest_region(&forward.regions);
        let (r_index, r_area) = largest_region(&reversed.regions);
        let (mut regions, winner_index) = if r_area >= f_area {
            (reversed.regions, r_index)
        } else {
            (forward.regions, f_index)
        };
        let mut winner = regions.remove(winner_index);
        winner.prune_collinear()?;

        let mut out = vec![winner];
        for mut region in regions {
            region.prune_collinear()?;
            if region.is_axis_aligned_rect() {
                out.push(region);
            }
        }
        Ok(out)
    }

    /// Rectangle decomposition over both traversal orders: the winning
    /// order's largest region first, then its remaining rectangles. Empty
    /// when neither order's largest region prunes down to a rectangle.
    pub fn max_area_rects(points: &[Point2<f64>]) -> Result<Vec<Region>> {
        let forward = Self::decomposed(points)?;
        let reversed_points: Vec<_> = points.iter().rev().copied().collect();
        let reversed = Self::decomposed(&reversed_points)?;

        let (f_index, f_area) = largest_region(&forward.regions);
        let (r_index, r_area) = largest_region(&reversed.regions);

        let mut f_regions = forward.regions;
        let mut f_winner = f_regions.remove(f_index);
        f_winner.prune_collinear()?;
        let mut r_regions = reversed.regions;
        let mut r_winner = r_regions.remove(r_index);
        r_winner.prune_collinear()?;

        let (winner, rest) = if r_area >= f_area && r_winner.is_axis_aligned_rect() {
            (r_winner, r_regions)
        } else if f_winner.is_axis_aligned_rect() {
            (f_winner, f_regions)
        } else {
            return Ok(Vec::new());
        };

        let mut out = vec![winner];
        for mut region in rest {
            region.prune_collinear()?;
            if region.is_axis_aligned_rect() {
                out.push(region);
            }
        }
        Ok(out)
    }

    /// Point lists of [`max_area_regions`](Self::max_area_regions), each
    /// ordered to the requested winding.
    pub fn max_area_points(
        points: &[Point2<f64>],
        winding: Orientation,
    ) -> Result<Vec<Vec<Point2<f64>>>> {
        Ok(Self::max_area_regions(points)?
            .iter()
            .map(|r| r.points_ordered(winding))
            .collect())
    }

    /// Point lists of [`max_area_rects`](Self::max_area_rects), each
    /// ordered to the requested winding.
    pub fn max_area_rect_points(
        points: &[Point2<f64>],
        winding: Orientation,
    ) -> Result<Vec<Vec<Point2<f64>>>> {
        Ok(Self::max_area_rects(points)?
            .iter()
            .map(|r| r.points_ordered(winding))
            .collect())
    }

    /// Classify and split without triangulating, for the max-area queries.
    fn decomposed(points: &[Point2<f64>]) -> Result<Self> {
        let mut polygon = Self::new(points)?;
        polygon.classify();
        polygon.split_concave(&mut |_| {})?;
        Ok(polygon)
    }

    fn classify(&mut self) {
        self.regions[0].compute_convexity();
        self.convexity = self.regions[0].convexity;
    }

    /// Split every concave region along a visibility chord until only
    /// convex regions remain. A region whose concave vertex sees no
    /// boundary edge is left as-is.
    fn split_concave(&mut self, sink: &mut dyn FnMut(Point2<f64>)) -> Result<()> {
        let mut cursor = 0;
        while cursor < self.regions.len() {
            if !self.split_region_once(cursor, sink)? {
                cursor += 1;
            }
        }
        Ok(())
    }

    /// Perform at most one split of the region at `cursor`. Returns `true`
    /// when the region was replaced by two sub-regions.
    fn split_region_once(
        &mut self,
        cursor: usize,
        sink: &mut dyn FnMut(Point2<f64>),
    ) -> Result<bool> {
        let winding = self.winding;
        let ring = &self.regions[cursor].ring;
        let len = ring.len();

        let concave_at = (0..len).find(|&i| {
            let turn = ring.get_safe(i as isize).turn;
            turn != Orientation::Collinear && turn != Orientation::Unset && turn != winding
        });
        let Some(i) = concave_at else {
            return Ok(false);
        };

        let end = *ring.get(i)?;
        let start = *ring.get_safe(i as isize - 1);
        debug!(
            region = cursor,
            x = end.pos.x,
            y = end.pos.y,
            "casting visibility ray through concave vertex"
        );

        // Cast the ray from the concave vertex's predecessor through the
        // vertex, against every boundary edge not adjacent to it.
        let mut hits: SmallVec<[(usize, Point2<f64>); 4]> = SmallVec::new();
        for j in (i + 1)..(len + i - 2) {
            let a = *ring.get_safe(j as isize);
            let b = *ring.get_safe(j as isize + 1);
            if a.pos == b.pos || start.pos == end.pos {
                continue;
            }
            let ray = Line2::ray_through(start.pos, end.pos)?;
            let edge = Line2::segment(a.pos, b.pos)?;
            if let Some(p) = ray.intersect(&edge) {
                trace!(edge = ring.normal_index(j as isize), x = p.x, y = p.y, "ray hit");
                hits.push((ring.normal_index(j as isize), p));
            }
        }
        if hits.is_empty() {
            warn!(
                region = cursor,
                x = end.pos.x,
                y = end.pos.y,
                "no boundary edge visible from concave vertex, leaving region unsplit"
            );
            return Ok(false);
        }

        // Nearest hit to the concave vertex; equal distances keep the
        // later candidate.
        let (mut index, mut split_point) = hits[0];
        let mut best = distance(&split_point, &end.pos);
        for &(edge, p) in hits.iter().skip(1) {
            let d = distance(&p, &end.pos);
            if d <= best {
                index = edge;
                split_point = p;
                best = d;
            }
        }

        let global = self.vertices.len();
        self.regions[cursor]
            .ring
            .append(index, BoundaryVertex::new(split_point, global))?;
        self.vertices.push(split_point);
        self.split_points.push(split_point);
        sink(split_point);

        // Walk both arcs between the split point and the concave vertex,
        // forming the two sub-boundaries. Inserting the split point shifted
        // positions after it by one.
        let mut i = i;
        if i > index {
            i += 1;
        }
        index += 1;
        let ring = &self.regions[cursor].ring;
        let n = ring.len();
        let (first, second) = if i > index {
            (
                (index..=i)
                    .map(|j| ring.get_safe(j as isize).detached())
                    .collect::<Vec<_>>(),
                (i..=(n + index))
                    .map(|j| ring.get_safe(j as isize).detached())
                    .collect::<Vec<_>>(),
            )
        } else {
            (
                (index..=(n + i))
                    .map(|j| ring.get_safe(j as isize).detached())
                    .collect::<Vec<_>>(),
                (i..=index)
                    .map(|j| ring.get_safe(j as isize).detached())
                    .collect::<Vec<_>>(),
            )
        };
        let mut child1 = Region::from_vertices(winding, first);
        let mut child2 = Region::from_vertices(winding, second);
        child1.compute_convexity();
        child2.compute_convexity();
        debug!(
            region = cursor,
            left = child1.len(),
            right = child2.len(),
            "split region into sub-boundaries"
        );
        self.regions.push(child1);
        self.regions.push(child2);
        self.regions.remove(cursor);
        Ok(true)
    }

    /// Fan triangulate every region from its first vertex, accumulating
    /// the total area.
    fn triangulate(&mut self) {
        let mut triangles = Vec::new();
        let mut area = 0.0;
        for region in &self.regions {
            let len = region.ring.len();
            if len < 3 {
                continue;
            }
            for idx in 1..len - 1 {
                let a = *region.ring.get_safe(0);
                let b = *region.ring.get_safe(idx as isize);
                let c = *region.ring.get_safe(idx as isize + 1);
                area += (orient::cross2(b.pos - a.pos, c.pos - a.pos) * 0.5).abs();
                triangles.push([a, b, c]);
            }
        }
        self.triangles = triangles;
        self.area = area;
    }
}

/// Index and fan area of the largest region; equal areas keep the later
/// region.
fn largest_region(regions: &[Region]) -> (usize, f64) {
    let mut best = 0;
    let mut best_area = 0.0;
    for (k, region) in regions.iter().enumerate() {
        let area = region.area();
        if k == 0 || area >= best_area {
            best = k;
            best_area = area;
        }
    }
    (best, best_area)
}
