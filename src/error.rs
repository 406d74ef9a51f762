use std::path::PathBuf;
use thiserror::Error;

/// Error type for locale indexing and key resolution
#[derive(Debug, Error)]
pub enum IndexError {
    /// A locale file could not be read
    #[error("Failed to read locale file {file}: {source}")]
    Read {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse YAML file
    #[error("Failed to parse YAML file {file} at line {line}, column {column}:\n{reason}\n\nTip: Verify the YAML syntax is correct")]
    YamlParse {
        file: PathBuf,
        line: usize,
        column: usize,
        reason: String,
    },

    /// Failed to parse JSON file
    #[error("Failed to parse JSON file {file}:\n{reason}\n\nTip: Verify the JSON syntax is correct")]
    JsonParse { file: PathBuf, reason: String },

    /// A configured locale directory does not exist
    #[error("Locale path not found: {path}\n\nTip: Check the localePaths setting")]
    PathNotFound { path: PathBuf },

    /// A flattened key exceeded the length guard
    #[error("Translation key is too long ({len} characters): {key}")]
    KeyTooLong { key: String, len: usize },

    /// Invalid configuration value
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid JSON in a settings file
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl IndexError {
    /// Create a Read error for a locale file
    pub fn read(file: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            file: file.into(),
            source,
        }
    }

    /// Create a YamlParse error from a file path and scanner position
    pub fn yaml_parse(
        file: impl Into<PathBuf>,
        line: usize,
        column: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::YamlParse {
            file: file.into(),
            line,
            column,
            reason: reason.into(),
        }
    }

    /// Create a JsonParse error from a file path and reason
    pub fn json_parse(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::JsonParse {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a PathNotFound error
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    /// Create a KeyTooLong error
    pub fn key_too_long(key: impl Into<String>) -> Self {
        let key = key.into();
        let len = key.chars().count();
        Self::KeyTooLong { key, len }
    }
}

/// Result type alias for IndexError
pub type Result<T> = std::result::Result<T, IndexError>;
