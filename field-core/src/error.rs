use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the particle field library.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The drawing surface has no usable area; the field renders nothing.
    #[error("drawing surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: f32, height: f32 },

    #[error("invalid config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, FieldError>;
