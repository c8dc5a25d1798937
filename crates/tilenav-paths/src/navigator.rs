use log::debug;
use tilenav_core::{Point, Range};

use crate::config::NavConfig;
use crate::error::PathError;

/// A cell paired with a search cost (A* cost or scan depth).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// Sentinel cost for cells a search has not reached.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Per-cell search record
// ---------------------------------------------------------------------------

/// Search-scoped state for one cell. A record only counts when its
/// `generation` matches the navigator's current one; anything else reads as
/// "unvisited" with infinite `g`.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            h: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
            closed: false,
        }
    }
}

/// Open-list entry, ordered for `BinaryHeap` so that the lowest `f` pops
/// first, then the lowest `h`, then the lowest point in row-major order.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) h: i32,
    pub(crate) pos: Point,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then(other.h.cmp(&self.h))
            .then(other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// Pathfinding and movement-range queries over one grid rectangle.
///
/// The navigator keeps every search-scoped value (costs, parents, open and
/// closed membership, scan depths) in its own tables indexed by cell, so the
/// terrain is only ever read. Tables are allocated once; each query starts
/// by bumping a generation counter or clearing the scan map, so nothing
/// leaks from one query into the next.
///
/// Queries take `&mut self`: one navigator runs one query at a time. Use a
/// navigator per thread to search the same terrain concurrently.
pub struct Navigator {
    pub(crate) bounds: Range,
    pub(crate) width: usize,
    pub(crate) config: NavConfig,
    // A* records
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    // reachability depths from the last scan
    pub(crate) reach_map: Vec<i32>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl Navigator {
    /// Create a navigator for the given grid rectangle with default settings.
    pub fn new(bounds: Range) -> Self {
        Self::with_config(bounds, NavConfig::default())
    }

    /// Create a navigator with explicit settings.
    pub fn with_config(bounds: Range, config: NavConfig) -> Self {
        let len = bounds.len();
        Self {
            bounds,
            width: bounds.width().max(0) as usize,
            config,
            nodes: vec![Node::default(); len],
            generation: 0,
            reach_map: vec![UNREACHABLE; len],
            nbuf: Vec::with_capacity(8),
        }
    }

    /// The grid rectangle being searched.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Current settings.
    #[inline]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Replace the settings used by later queries.
    pub fn set_config(&mut self, config: NavConfig) {
        self.config = config;
    }

    /// Change the grid rectangle, reusing the tables' allocations.
    ///
    /// Every record and the last scan are dropped.
    pub fn set_bounds(&mut self, bounds: Range) {
        let len = bounds.len();
        self.bounds = bounds;
        self.width = bounds.width().max(0) as usize;
        self.nodes.clear();
        self.nodes.resize(len, Node::default());
        self.reach_map.clear();
        self.reach_map.resize(len, UNREACHABLE);
        self.generation = 0;
    }

    /// Adopt `bounds` if they differ from the current rectangle.
    pub(crate) fn fit_to(&mut self, bounds: Range) {
        if self.bounds != bounds {
            debug!("[navigator] bounds {} -> {bounds}", self.bounds);
            self.set_bounds(bounds);
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Like [`idx`](Self::idx), but reject the point as a caller error.
    #[inline]
    pub(crate) fn checked_idx(&self, p: Point) -> Result<usize, PathError> {
        self.idx(p).ok_or(PathError::OutOfBounds(p))
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.bounds.min.x;
        let y = (idx / self.width) as i32 + self.bounds.min.y;
        Point::new(x, y)
    }

    /// Start a new A* generation, wiping all records if the counter wraps.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            for n in self.nodes.iter_mut() {
                *n = Node::default();
            }
            self.generation = 1;
        }
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn idx_round_trips_with_offset_bounds() {
        let nav = Navigator::new(Range::new(2, 3, 7, 6));
        for p in nav.bounds().iter() {
            let i = nav.idx(p).unwrap();
            assert_eq!(nav.point(i), p);
        }
        assert_eq!(nav.idx(Point::new(1, 3)), None);
        assert_eq!(
            nav.checked_idx(Point::new(7, 3)),
            Err(PathError::OutOfBounds(Point::new(7, 3)))
        );
    }

    #[test]
    fn heap_pops_lowest_f_then_h_then_point() {
        let mut heap = BinaryHeap::new();
        let entry = |f, h, x, y| NodeRef {
            idx: 0,
            f,
            h,
            pos: Point::new(x, y),
        };
        heap.push(entry(30, 10, 0, 0));
        heap.push(entry(20, 10, 5, 5));
        heap.push(entry(20, 0, 9, 9));
        heap.push(entry(20, 0, 1, 9));
        heap.push(entry(40, 0, 0, 0));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|n| (n.f, n.h, n.pos))
            .collect();
        assert_eq!(
            order,
            vec![
                (20, 0, Point::new(1, 9)),
                (20, 0, Point::new(9, 9)),
                (20, 10, Point::new(5, 5)),
                (30, 10, Point::new(0, 0)),
                (40, 0, Point::new(0, 0)),
            ]
        );
    }

    #[test]
    fn set_bounds_resizes_and_clears() {
        let mut nav = Navigator::new(Range::with_size(2, 2));
        nav.reach_map[0] = 3;
        nav.generation = 7;
        nav.set_bounds(Range::new(5, 5, 8, 9));
        assert_eq!(nav.bounds(), Range::new(5, 5, 8, 9));
        assert_eq!(nav.nodes.len(), 12);
        assert_eq!(nav.reach_map.len(), 12);
        assert!(nav.reach_map.iter().all(|&d| d == UNREACHABLE));
        assert_eq!(nav.generation, 0);
        assert_eq!(nav.point(nav.idx(Point::new(7, 8)).unwrap()), Point::new(7, 8));
    }

    #[test]
    fn generation_wrap_resets_records() {
        let mut nav = Navigator::new(Range::with_size(2, 2));
        nav.nodes[0].generation = u32::MAX;
        nav.nodes[0].closed = true;
        nav.generation = u32::MAX;
        assert_eq!(nav.next_generation(), 1);
        assert!(!nav.nodes[0].closed);
        assert_eq!(nav.nodes[0].generation, 0);
    }
}
