/// Tile sheet slicing and catalog assembly
pub mod atlas;
/// Command-line interface and batch processing
pub mod cli;
/// Command scripts driving a solver
pub mod commands;
/// Solver constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Grid rendering and PNG export
pub mod image;
/// Stderr backend for the `log` facade
pub mod logging;
/// Tile set configuration parser
pub mod manifest;
/// Progress bars for batch runs
pub mod progress;
/// Animated GIF of the collapse history
pub mod visualization;
