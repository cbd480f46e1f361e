//! Error types for the theme_colors library

use thiserror::Error;

/// Result type alias for theme_colors operations
pub type Result<T> = std::result::Result<T, ThemeColorError>;

/// Errors reported by the engine.
///
/// Parsing failures are not errors: [`crate::parse`] returns `None` for
/// unrecognized color text, and out-of-gamut colors are clamped silently.
#[derive(Error, Debug)]
pub enum ThemeColorError {
    /// No pixel data was supplied to the extractor
    #[error("No image provided: pixel buffer is empty")]
    NoImage,

    /// Pixel buffer length disagrees with the declared dimensions
    #[error("Invalid pixel buffer: expected {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// Too few pixels survived the sampling filters
    #[error("Insufficient color variety: {samples} usable samples (minimum {minimum})")]
    InsufficientColorVariety { samples: usize, minimum: usize },

    /// Color text could not be parsed (only raised through `FromStr`)
    #[error("Unparseable color: {input}")]
    Unparseable { input: String },

    /// Invalid configuration value
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Configuration file could not be read or written
    #[error("Configuration I/O error: {message}")]
    ConfigIo {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the expected structure
    #[error("Configuration format error: {message}")]
    ConfigFormat {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ThemeColorError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Create a configuration I/O error with context
    pub fn config_io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::ConfigIo {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration format error with context
    pub fn config_format(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ConfigFormat {
            message: message.into(),
            source,
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Recoverable errors depend on the image content rather than on the
    /// caller, so retrying with a different image can succeed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ThemeColorError::InsufficientColorVariety { .. } | ThemeColorError::Unparseable { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            ThemeColorError::NoImage => {
                "No image was provided. Please choose an image first.".to_string()
            }
            ThemeColorError::InsufficientColorVariety { .. } => {
                "Insufficient color variety. Try an image with more distinct, mid-tone colors."
                    .to_string()
            }
            ThemeColorError::Unparseable { input } => format!(
                "'{}' is not a recognized color. Use #RRGGBB, rgb(r, g, b) or oklch(L C H).",
                input
            ),
            _ => "Color processing failed. Please try again with different input.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_variety_message() {
        let err = ThemeColorError::InsufficientColorVariety { samples: 3, minimum: 10 };
        assert_eq!(
            err.to_string(),
            "Insufficient color variety: 3 usable samples (minimum 10)"
        );
        assert!(err.is_recoverable());
        assert!(err.user_message().contains("Insufficient color variety"));
    }

    #[test]
    fn test_no_image_is_distinct_from_under_sampling() {
        let err = ThemeColorError::NoImage;
        assert!(!err.is_recoverable());
        assert!(err.user_message().contains("No image"));
    }

    #[test]
    fn test_invalid_parameter_helper() {
        let err = ThemeColorError::invalid_parameter("max_depth", 0);
        assert_eq!(err.to_string(), "Invalid parameter: max_depth = 0");
    }

    #[test]
    fn test_config_format_keeps_source() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ThemeColorError::config_format("bad config", source);
        assert!(std::error::Error::source(&err).is_some());
    }
}
