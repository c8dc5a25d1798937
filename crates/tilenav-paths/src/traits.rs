use tilenav_core::{Point, Terrain, push_traversible_neighbors};

use crate::distance::{DIAGONAL_COST, STRAIGHT_COST, octile};

/// Minimal search interface: neighbor enumeration.
pub trait Pather {
    /// Append the cells one step away from `p` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to the adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Pather with an admissible heuristic, as required by A*.
pub trait AstarPather: WeightedPather {
    /// Estimated cost from `from` to `to`. Must never overestimate.
    fn estimate(&self, from: Point, to: Point) -> i32;
}

/// The standard tile movement model over any [`Terrain`].
///
/// Neighbours are the corner-cut-safe traversible cells. A step costs
/// [`STRAIGHT_COST`] or [`DIAGONAL_COST`]; the heuristic is [`octile`].
#[derive(Debug)]
pub struct GridPather<'a, T: ?Sized> {
    terrain: &'a T,
}

impl<'a, T: Terrain + ?Sized> GridPather<'a, T> {
    pub fn new(terrain: &'a T) -> Self {
        Self { terrain }
    }

    /// The terrain being navigated.
    pub fn terrain(&self) -> &'a T {
        self.terrain
    }
}

impl<T: ?Sized> Clone for GridPather<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for GridPather<'_, T> {}

impl<T: Terrain + ?Sized> Pather for GridPather<'_, T> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        push_traversible_neighbors(self.terrain, p, buf);
    }
}

impl<T: Terrain + ?Sized> WeightedPather for GridPather<'_, T> {
    fn cost(&self, from: Point, to: Point) -> i32 {
        debug_assert!(from.is_adjacent(to), "{from} -> {to} is not a single step");
        if from.is_diagonal_to(to) {
            DIAGONAL_COST
        } else {
            STRAIGHT_COST
        }
    }
}

impl<T: Terrain + ?Sized> AstarPather for GridPather<'_, T> {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        octile(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilenav_core::TileGrid;

    #[test]
    fn step_costs_match_octile() {
        let grid = TileGrid::new(3, 3);
        let pather = GridPather::new(&grid);
        let c = Point::new(1, 1);
        for n in grid.traversible_neighbors(c) {
            assert_eq!(pather.cost(c, n), octile(c, n));
        }
        assert_eq!(pather.cost(c, Point::new(2, 1)), STRAIGHT_COST);
        assert_eq!(pather.cost(c, Point::new(2, 2)), DIAGONAL_COST);
    }
}
