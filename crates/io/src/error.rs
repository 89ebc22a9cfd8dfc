//! Error types for tempest-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the tempest-io crate.
///
/// Covers Parquet output failures, basin parameter files that cannot be read
/// or parsed, and parameter values rejected after parsing.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// The requested file is absent.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// Wraps a filesystem failure.
    #[error("i/o error on {}: {reason}", path.display())]
    File {
        /// Path being read or written.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the Arrow or Parquet libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Message from arrow or parquet.
        reason: String,
    },

    /// Returned when a TOML parameter file cannot be parsed.
    #[error("failed to parse {}: {reason}", path.display())]
    Toml {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// Returned when parsed parameters violate a model invariant.
    #[error("invalid parameters in {}: {reason}", path.display())]
    Parameters {
        /// File the parameters came from.
        path: PathBuf,
        /// Description of the violated invariant.
        reason: String,
    },

    /// Inputs rejected before writing.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// How many problems were found.
        count: usize,
        /// Problems joined with `; `.
        details: String,
    },
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/Frio.toml"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/Frio.toml");
    }

    #[test]
    fn display_file() {
        let err = IoError::File {
            path: PathBuf::from("out.parquet"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "i/o error on out.parquet: permission denied");
    }

    #[test]
    fn display_parquet() {
        let err = IoError::Parquet {
            reason: "corrupt footer".to_string(),
        };
        assert_eq!(err.to_string(), "parquet error: corrupt footer");
    }

    #[test]
    fn display_toml() {
        let err = IoError::Toml {
            path: PathBuf::from("params/Frio.toml"),
            reason: "missing field `latitude`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse params/Frio.toml: missing field `latitude`"
        );
    }

    #[test]
    fn display_parameters() {
        let err = IoError::Parameters {
            path: PathBuf::from("Frio.toml"),
            reason: "month 3: invalid spell".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid parameters in Frio.toml: month 3: invalid spell"
        );
    }

    #[test]
    fn display_validation() {
        let err = IoError::Validation {
            count: 2,
            details: "row_group_size must be at least 1; pet columns missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "2 validation error(s): row_group_size must be at least 1; pet columns missing"
        );
    }

    #[test]
    fn from_parquet_error() {
        let pq_err = parquet::errors::ParquetError::General("test pq error".to_string());
        let err: IoError = pq_err.into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("test pq error"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
