//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use wavetile::WaveError;
    use wavetile::io::error::{
        catalog_error, configuration_error, file_system_error, invalid_parameter, io_error,
    };

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = file_system_error("/tmp/tiles.configuration", "read configuration", source);

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("read configuration"));
        assert!(message.contains("/tmp/tiles.configuration"));
        assert!(message.contains("file not found"));
    }

    // Tests out of bounds formatting
    // Verified by swapping the coordinates
    #[test]
    fn test_out_of_bounds_message() {
        let error = WaveError::OutOfBounds {
            position: (9, -1),
            dimensions: (8, 8),
        };
        assert_eq!(error.to_string(), "Cell (9, -1) is outside the 8x8 grid");
        assert!(error.source().is_none());
    }

    // Tests configuration errors carry the line number
    // Verified by omitting the line from the message
    #[test]
    fn test_configuration_error() {
        let error = configuration_error(7, &"missing weight");

        assert!(matches!(error, WaveError::Configuration { line: 7, .. }));
        assert_eq!(
            error.to_string(),
            "Invalid configuration at line 7: missing weight"
        );
    }

    // Tests catalog errors carry their reason
    // Verified by dropping the reason
    #[test]
    fn test_catalog_error() {
        let error = catalog_error(&"tile set contains no tiles");
        assert_eq!(
            error.to_string(),
            "Invalid tile catalog: tile set contains no tiles"
        );
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("width", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("width"));
        assert!(message.contains('0'));
        assert!(message.contains("must be positive"));
    }

    // Tests path validation errors name the path parameter
    // Verified by using a different parameter name
    #[test]
    fn test_io_error() {
        let error = io_error("Target must be a .configuration file or directory");
        assert!(matches!(
            error,
            WaveError::InvalidParameter {
                parameter: "path",
                ..
            }
        ));
    }

    // Tests conversion from a bare I/O error
    // Verified by discarding the source
    #[test]
    fn test_from_io_error() {
        let error = WaveError::from(std::io::Error::other("disk full"));
        assert!(matches!(error, WaveError::FileSystem { .. }));
        assert!(error.to_string().contains("disk full"));
    }
}
