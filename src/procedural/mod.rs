//! Procedural geometry generation.

pub use crate::procedural::grid::{unit_grid, GridMesh, GridSize};

mod grid;
