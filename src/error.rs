use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for gpuwatch
#[derive(Debug, Error)]
pub enum GpuWatchError {
    /// Terminal initialization or operation failed
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Configuration parsing failed
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Metrics query unavailable, empty, or malformed
    #[error("Collection error: {reason}")]
    Collection { reason: String },

    /// Table-formatting collaborator failed
    #[error("Render error: {reason}")]
    Render { reason: String },

    /// start() called on a session that is already running
    #[error("Monitoring session is already running")]
    AlreadyRunning,

    /// CSV log file could not be written
    #[error("Persistence error: {path}: {reason}")]
    Persistence { path: PathBuf, reason: String },
}

impl GpuWatchError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        GpuWatchError::Config {
            message: message.into(),
        }
    }

    /// Create a collection error
    pub fn collection(reason: impl Into<String>) -> Self {
        GpuWatchError::Collection {
            reason: reason.into(),
        }
    }

    /// Create a render error
    pub fn render(reason: impl Into<String>) -> Self {
        GpuWatchError::Render {
            reason: reason.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        GpuWatchError::Persistence {
            path: path.into(),
            reason: reason.into(),
        }
    }

}

/// Result type alias for gpuwatch operations
pub type Result<T> = std::result::Result<T, GpuWatchError>;

impl From<toml::de::Error> for GpuWatchError {
    fn from(err: toml::de::Error) -> Self {
        GpuWatchError::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GpuWatchError::collection("nvidia-smi returned no output");
        assert!(err.to_string().contains("nvidia-smi returned no output"));
        assert!(matches!(err, GpuWatchError::Collection { .. }));
    }

    #[test]
    fn test_error_creation_helpers() {
        let err = GpuWatchError::render("tabulate exited non-zero");
        assert!(
            matches!(err, GpuWatchError::Render { reason } if reason == "tabulate exited non-zero")
        );

        let err = GpuWatchError::persistence("/tmp/gpuwatch.csv", "permission denied");
        assert!(
            matches!(err, GpuWatchError::Persistence { path, .. } if path == PathBuf::from("/tmp/gpuwatch.csv"))
        );
    }
}
