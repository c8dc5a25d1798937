//! **tilenav-core**: grid geometry and traversability topology.
//!
//! This crate holds the types shared by the navigation algorithms in
//! `tilenav-paths`: integer geometry, the [`Terrain`] seam through which a
//! host game exposes which cells are walkable, an owned [`TileGrid`], and the
//! corner-cut-safe neighbour queries.

pub mod geom;
pub mod grid;
pub mod neighbors;

pub use geom::{Point, Range};
pub use grid::{BLOCKED, GridError, OPEN, Terrain, TileGrid};
pub use neighbors::{push_neighbors, push_traversible_neighbors};
