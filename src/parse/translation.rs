use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Represents a single translation entry found in a locale file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// The full dot-notation key (e.g., "invoice.labels.add_new")
    pub key: String,
    /// The translation value, always stored as text (e.g., "Add New")
    pub value: String,
    /// Lower-cased language code, when one could be inferred
    pub language: Option<String>,
    /// The file path where this entry was found
    pub file: PathBuf,
    /// The line number where the key is defined (1-indexed), if known
    pub line: Option<usize>,
}

impl TranslationEntry {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        language: Option<String>,
        file: impl Into<PathBuf>,
        line: Option<usize>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            language,
            file: file.into(),
            line,
        }
    }

    /// Language used for grouping; entries without one share the "unknown" bucket.
    pub fn language_or_unknown(&self) -> &str {
        self.language.as_deref().unwrap_or("unknown")
    }
}
