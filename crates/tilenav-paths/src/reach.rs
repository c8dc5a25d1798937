//! Movement-range scanning.

use std::collections::HashMap;

use log::trace;
use tilenav_core::{Point, Terrain};

use crate::Navigator;
use crate::error::PathError;
use crate::navigator::{PathNode, UNREACHABLE};
use crate::traits::{GridPather, Pather};

/// The cells a unit can reach from a source within a number of expansion
/// steps. The source itself is never a member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<PathNode>", into = "Vec<PathNode>")
)]
pub struct ReachableSet {
    /// Members in discovery order; `cost` is the step at which the cell was
    /// reached, starting from 1.
    nodes: Vec<PathNode>,
    depths: HashMap<Point, i32>,
}

impl ReachableSet {
    fn from_nodes(nodes: Vec<PathNode>) -> Self {
        let depths = nodes.iter().map(|n| (n.pos, n.cost)).collect();
        Self { nodes, depths }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `p` is in range.
    pub fn contains(&self, p: Point) -> bool {
        self.depths.contains_key(&p)
    }

    /// The expansion step at which `p` entered the set.
    pub fn depth(&self, p: Point) -> Option<i32> {
        self.depths.get(&p).copied()
    }

    /// Members with their depths, in discovery order.
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Member cells in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().map(|n| n.pos)
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.nodes.into_iter().map(|n| n.pos).collect()
    }

    /// Whether every member of `self` is also in `other`.
    pub fn is_subset(&self, other: &ReachableSet) -> bool {
        self.nodes.iter().all(|n| other.contains(n.pos))
    }
}

impl From<Vec<PathNode>> for ReachableSet {
    fn from(nodes: Vec<PathNode>) -> Self {
        Self::from_nodes(nodes)
    }
}

impl From<ReachableSet> for Vec<PathNode> {
    fn from(set: ReachableSet) -> Self {
        set.nodes
    }
}

impl Navigator {
    /// Compute the cells reachable from `source` within `range` expansion
    /// steps over `terrain`.
    ///
    /// Each step adds every corner-cut-safe traversible neighbour of the
    /// cells added by the previous step. The range counts steps, not movement
    /// cost: a diagonal neighbour is one step away just like a straight one.
    /// A `range` of 0 or less gives an empty set.
    ///
    /// As with [`find_path`](Self::find_path), the navigator adopts
    /// `terrain.bounds()` first.
    pub fn compute_reachable<T: Terrain + ?Sized>(
        &mut self,
        terrain: &T,
        source: Point,
        range: i32,
    ) -> Result<ReachableSet, PathError> {
        self.fit_to(terrain.bounds());
        self.reachable(&GridPather::new(terrain), source, range)
    }

    /// [`compute_reachable`](Self::compute_reachable) with the configured
    /// [`movement_range`](crate::NavConfig::movement_range).
    pub fn movement_range<T: Terrain + ?Sized>(
        &mut self,
        terrain: &T,
        source: Point,
    ) -> Result<ReachableSet, PathError> {
        let range = self.config.movement_range;
        self.compute_reachable(terrain, source, range)
    }

    /// Bounded expansion with an arbitrary neighbourhood, inside the
    /// navigator's own [`bounds`](Self::bounds).
    pub fn reachable<P: Pather>(
        &mut self,
        pather: &P,
        source: Point,
        range: i32,
    ) -> Result<ReachableSet, PathError> {
        let si = self.checked_idx(source)?;

        for v in self.reach_map.iter_mut() {
            *v = UNREACHABLE;
        }
        self.reach_map[si] = 0;

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut nodes = Vec::new();

        nbuf.clear();
        pather.neighbors(source, &mut nbuf);
        let mut frontier = nbuf.clone();
        let mut added: Vec<Point> = Vec::new();

        for step in 1..=range.max(0) {
            added.clear();
            for &p in frontier.iter() {
                let Some(i) = self.idx(p) else {
                    continue;
                };
                if self.reach_map[i] != UNREACHABLE {
                    continue;
                }
                self.reach_map[i] = step;
                added.push(p);
                nodes.push(PathNode { pos: p, cost: step });
            }
            if added.is_empty() {
                // Saturated: later steps cannot add anything.
                break;
            }

            frontier.clear();
            for &p in added.iter() {
                nbuf.clear();
                pather.neighbors(p, &mut nbuf);
                frontier.extend_from_slice(&nbuf);
            }
        }

        self.nbuf = nbuf;
        trace!(
            "[reach] {} cells within {range} steps of {source}",
            nodes.len()
        );
        Ok(nodes.into())
    }

    /// Whether `p` was in range in the last scan.
    ///
    /// Returns `false` for the scan's source, for points outside the grid,
    /// and before any scan has run.
    pub fn is_in_range(&self, p: Point) -> bool {
        self.idx(p)
            .is_some_and(|i| (1..UNREACHABLE).contains(&self.reach_map[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavConfig;
    use crate::distance::chebyshev;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tilenav_core::{Range, TileGrid};

    fn scan(grid: &TileGrid, source: Point, range: i32) -> ReachableSet {
        Navigator::new(grid.bounds())
            .compute_reachable(grid, source, range)
            .unwrap()
    }

    #[test]
    fn range_one_is_moore_neighbourhood() {
        let grid = TileGrid::new(3, 3);
        let set = scan(&grid, Point::new(0, 0), 1);
        assert_eq!(set.len(), 3);
        let set = scan(&grid, Point::new(1, 1), 1);
        assert_eq!(set.len(), 8);
        assert!(!set.contains(Point::new(1, 1)));
        assert!(set.iter().all(|p| set.depth(p) == Some(1)));
    }

    #[test]
    fn range_zero_is_empty() {
        let grid = TileGrid::new(4, 4);
        assert!(scan(&grid, Point::new(1, 1), 0).is_empty());
        assert!(scan(&grid, Point::new(1, 1), -3).is_empty());
    }

    #[test]
    fn depths_grow_by_ring() {
        let grid = TileGrid::new(7, 7);
        let set = scan(&grid, Point::new(3, 3), 2);
        assert_eq!(set.len(), 24);
        assert_eq!(set.depth(Point::new(4, 4)), Some(1));
        assert_eq!(set.depth(Point::new(5, 1)), Some(2));
        assert_eq!(set.depth(Point::new(6, 3)), None);
        assert_eq!(set.depth(Point::new(3, 3)), None);
        // On an open field a step is a king move.
        let source = Point::new(3, 3);
        assert!(set.iter().all(|p| set.depth(p) == Some(chebyshev(source, p))));
    }

    #[test]
    fn enclosed_pocket_saturates() {
        let grid = TileGrid::from_ascii(
            "\
#####.
#..##.
#...#.
#####.",
        )
        .unwrap();
        let set = scan(&grid, Point::new(1, 1), 50);
        let mut cells = set.into_vec();
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(2, 2),
                Point::new(3, 2),
            ]
        );
    }

    #[test]
    fn respects_corner_rule() {
        // The open cell at (2,0) only touches (1,1) through a pinched corner.
        let grid = TileGrid::from_ascii(
            "\
.#.
..#
...",
        )
        .unwrap();
        let set = scan(&grid, Point::new(0, 0), 10);
        assert!(!set.contains(Point::new(2, 0)));
        assert!(set.contains(Point::new(2, 2)));
    }

    #[test]
    fn navigator_remembers_last_scan() {
        let grid = TileGrid::new(5, 5);
        let mut nav = Navigator::new(grid.bounds());
        assert!(!nav.is_in_range(Point::new(1, 1)));

        nav.compute_reachable(&grid, Point::new(0, 0), 1).unwrap();
        assert!(nav.is_in_range(Point::new(1, 1)));
        assert!(!nav.is_in_range(Point::new(0, 0)));
        assert!(!nav.is_in_range(Point::new(2, 2)));
        assert!(!nav.is_in_range(Point::new(9, 9)));

        // A new scan replaces the old flags.
        nav.compute_reachable(&grid, Point::new(4, 4), 1).unwrap();
        assert!(!nav.is_in_range(Point::new(1, 1)));
        assert!(nav.is_in_range(Point::new(3, 3)));
    }

    #[test]
    fn movement_range_uses_config() {
        let grid = TileGrid::new(9, 1);
        let cfg = NavConfig::default().with_movement_range(3);
        let mut nav = Navigator::with_config(grid.bounds(), cfg);
        let set = nav.movement_range(&grid, Point::new(0, 0)).unwrap();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn out_of_bounds_source() {
        let grid = TileGrid::new(3, 3);
        let mut nav = Navigator::new(Range::with_size(3, 3));
        assert_eq!(
            nav.compute_reachable(&grid, Point::new(5, 0), 2),
            Err(PathError::OutOfBounds(Point::new(5, 0)))
        );
    }

    #[test]
    fn scan_follows_terrain_bounds() {
        let grid = TileGrid::new(3, 3);
        let mut nav = Navigator::new(Range::with_size(10, 10));
        assert_eq!(
            nav.compute_reachable(&grid, Point::new(8, 8), 2),
            Err(PathError::OutOfBounds(Point::new(8, 8)))
        );
        let set = nav.compute_reachable(&grid, Point::new(0, 0), 5).unwrap();
        assert_eq!(set.len(), 8);
        assert_eq!(nav.bounds(), grid.bounds());
        assert!(!nav.is_in_range(Point::new(5, 5)));
    }

    #[test]
    fn larger_range_is_superset() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let grid = TileGrid::from_fn(10, 10, |_| !rng.gen_bool(0.3));
            let source = Point::new(rng.gen_range(0..10), rng.gen_range(0..10));
            let mut nav = Navigator::new(grid.bounds());
            let mut prev = nav.compute_reachable(&grid, source, 0).unwrap();
            for r in 1..8 {
                let next = nav.compute_reachable(&grid, source, r).unwrap();
                assert!(prev.is_subset(&next), "range {} not within {}", r - 1, r);
                assert!(next.iter().all(|p| grid.is_traversible(p)));
                prev = next;
            }
        }
    }

    #[test]
    fn agrees_with_pathfinder_connectivity() {
        let grid = TileGrid::from_ascii(
            "\
.....#....
.###.#.##.
.#...#..#.
.#.###..#.
...#......",
        )
        .unwrap();
        let mut nav = Navigator::new(grid.bounds());
        let source = Point::new(0, 0);
        let set = nav.compute_reachable(&grid, source, 100).unwrap();
        for p in grid.bounds().iter() {
            if p == source {
                continue;
            }
            let routed = nav.find_path(&grid, source, p).is_ok();
            assert_eq!(set.contains(p), routed, "disagreement at {p}");
        }
    }
}
