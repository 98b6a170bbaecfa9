//! Error types for the project model.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or serializing a project tree.
#[derive(Debug, Error)]
pub enum ModelError {
    /// An id was requested for an element type with no known prefix.
    #[error("unknown element type for ID generation: '{element_type}'")]
    UnrecognizedElementType { element_type: String },

    /// A required field was not supplied to a builder.
    #[error("{entity} is missing required field '{field}'")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// A frame range with its lower bound above its upper bound.
    #[error("{entity} has an invalid {field} range: {lower} > {upper}")]
    InvalidRange {
        entity: &'static str,
        field: &'static str,
        lower: i64,
        upper: i64,
    },

    /// An id that must be unique within the document was used twice.
    #[error("duplicate id in project: {id}")]
    DuplicateId { id: String },

    /// Writing a fragment into its buffer failed.
    #[error("xml write error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisting the project file failed.
    #[error("failed to write project file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rendered fragment was not valid UTF-8.
    #[error("serialized xml is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`ProjectConfig`](crate::ProjectConfig).
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value that must be positive is zero.
    #[error("invalid config file {path}: {field} must be greater than zero")]
    ConfigInvalid { path: PathBuf, field: &'static str },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::UnrecognizedElementType {
            element_type: "widget".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown element type for ID generation: 'widget'"
        );

        let err = ModelError::InvalidRange {
            entity: "clipitem",
            field: "start/end",
            lower: 10,
            upper: 2,
        };
        assert_eq!(err.to_string(), "clipitem has an invalid start/end range: 10 > 2");

        let err = ModelError::ConfigInvalid {
            path: PathBuf::from("xmeml.toml"),
            field: "sequence.timebase",
        };
        assert_eq!(
            err.to_string(),
            "invalid config file xmeml.toml: sequence.timebase must be greater than zero"
        );
    }
}
