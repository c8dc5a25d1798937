//! Pathfinding and movement-range queries for tile grids.
//!
//! Two independent queries run over any [`Terrain`](tilenav_core::Terrain):
//!
//! - **A\*** least-cost paths ([`Navigator::find_path`]), with straight steps
//!   costing 10 and diagonal steps 14
//! - **Movement range** scans ([`Navigator::compute_reachable`]), a
//!   breadth-first expansion bounded by a number of steps
//!
//! Both use the corner-cut-safe neighbourhood from `tilenav-core`, so no
//! route or range ever slips diagonally past the side of a wall.
//!
//! [`Navigator`] owns all search-scoped state, so the terrain is only read
//! and nothing carries over from one query to the next.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | movement range |
//! | [`WeightedPather`] : [`Pather`] | step costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`GridPather`] implements all three for the standard movement model.

mod astar;
mod config;
mod distance;
mod error;
mod navigator;
mod reach;
mod traits;

pub use astar::Path;
pub use config::NavConfig;
pub use distance::{DIAGONAL_COST, STRAIGHT_COST, chebyshev, octile};
pub use error::PathError;
pub use navigator::{Navigator, PathNode, UNREACHABLE};
pub use reach::ReachableSet;
pub use traits::{AstarPather, GridPather, Pather, WeightedPather};
