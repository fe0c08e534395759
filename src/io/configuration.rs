//! Solver constants and runtime configuration defaults

/// Multiplier of the polynomial hash folding edge pixels into a socket signature
pub const SOCKET_HASH_MULTIPLIER: i32 = 43;

/// Number of rotations a tile can take (0°, 90°, 180°, 270°)
pub const ROTATION_COUNT: usize = 4;

/// Rotation mask with every rotation enabled
pub const ALL_ROTATIONS_MASK: u8 = 0b1111;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default grid width and height in cells
pub const DEFAULT_GRID_SIZE: usize = 8;

// File naming
/// Extension of tile set configuration files
pub const CONFIGURATION_EXTENSION: &str = "configuration";
/// Extension of tile sheets paired with a configuration file
pub const TILE_SHEET_EXTENSION: &str = "png";
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Visualization settings
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 80;
/// Multiplier applied to the final frame delay so the finished grid stays visible
pub const GIF_FINAL_FRAME_HOLD: u32 = 25;
