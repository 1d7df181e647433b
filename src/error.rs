//! Error types for engine construction and host setup.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcadeError {
    /// The drawing surface has no 2D context to draw with.
    #[error("drawing surface has no 2D context")]
    SurfaceUnavailable,

    #[error("drawing surface {width}x{height} is too small for this game")]
    SurfaceTooSmall { width: u32, height: u32 },

    #[error("failed to read config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArcadeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_errors_describe_the_problem() {
        assert_eq!(
            ArcadeError::SurfaceUnavailable.to_string(),
            "drawing surface has no 2D context"
        );
        let err = ArcadeError::SurfaceTooSmall {
            width: 10,
            height: 0,
        };
        assert!(err.to_string().contains("10x0"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: ArcadeError = io.into();
        assert!(matches!(err, ArcadeError::Io(_)));
    }
}
