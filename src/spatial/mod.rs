//! Spatial data structures for the solver
//!
//! This module contains:
//! - Per-cell candidate state
//! - The fixed grid and its neighbor lookup

/// Grid of wave cells and neighbor lookup
pub mod grid;
/// Per-cell candidates and edge socket counts
pub mod wave;

pub use grid::Grid;
pub use wave::WaveCell;
