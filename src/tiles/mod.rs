//! Tile variants and the socket compatibility model
//!
//! This module contains:
//! - Socket signatures, edges and rotation of socket arrays
//! - The immutable tile catalog

/// Tile catalog construction and lookup
pub mod catalog;
/// Socket signature derivation, rotation and labels
pub mod sockets;

pub use catalog::{BaseTile, Catalog, Reality};
pub use sockets::{Edge, Signature, Sockets};
