//! Wave function collapse tile solver matching tiles by their edge sockets
//!
//! Tiles are cut from a sheet, every edge is hashed into a socket signature,
//! and a fixed grid is filled so that touching edges always carry equal
//! signatures. Cells are collapsed in lowest-entropy order and every collapse
//! is propagated to a local fixpoint.

#![forbid(unsafe_code)]

/// Candidate sets, propagation, selection and the solver context
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Grid of wave cells and neighbor lookup
pub mod spatial;
/// Socket signatures and the tile catalog
pub mod tiles;

pub use io::error::{Result, WaveError};
