//! Error types for catalog construction, configuration parsing and solver commands
//!
//! Contradictions reached during propagation are not errors; they are reported
//! through `PropagationReport` and `SolveOutcome` instead.

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver and I/O operations
#[derive(Debug)]
pub enum WaveError {
    /// Tile catalog could not be built from the supplied base tiles
    ///
    /// Raised for:
    /// - rotation masks that enable no rotation or use bits above the fourth
    /// - zero weights
    /// - empty tile sets
    /// - duplicate names when duplicates were not allowed
    Catalog {
        /// Description of the offending tile or rule
        reason: String,
    },

    /// Tile set configuration text is malformed
    Configuration {
        /// One-based line number where parsing failed
        line: usize,
        /// Description of what was expected
        reason: String,
    },

    /// Failed to load a tile sheet from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A command addressed a cell outside the grid
    OutOfBounds {
        /// Requested cell as (x, y)
        position: (i64, i64),
        /// Grid dimensions as (width, height)
        dimensions: (usize, usize),
    },
}

impl fmt::Display for WaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog { reason } => write!(f, "Invalid tile catalog: {reason}"),
            Self::Configuration { line, reason } => {
                write!(f, "Invalid configuration at line {line}: {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::OutOfBounds {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Cell ({}, {}) is outside the {}x{} grid",
                    position.0, position.1, dimensions.0, dimensions.1
                )
            }
        }
    }
}

impl std::error::Error for WaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, WaveError>;

impl From<std::io::Error> for WaveError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a catalog error
pub fn catalog_error(reason: &impl ToString) -> WaveError {
    WaveError::Catalog {
        reason: reason.to_string(),
    }
}

/// Create a configuration error for the given one-based line
pub fn configuration_error(line: usize, reason: &impl ToString) -> WaveError {
    WaveError::Configuration {
        line,
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WaveError {
    WaveError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a path validation error
pub fn io_error(msg: &str) -> WaveError {
    WaveError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}

/// Create a file system error for an operation on `path`
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> WaveError {
    WaveError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
