//! Locale index builder and translation key resolver.
//!
//! `LocaleIndex` scans YAML and JSON locale files under a workspace into an
//! in-memory list of [`TranslationEntry`] values; `KeyResolver` answers exact,
//! dynamic (`user.#{kind}.title`) and cross-language lookups against one
//! finished snapshot of that list.

pub mod config;
pub mod error;
pub mod files;
pub mod index;
pub mod output;
pub mod parse;
pub mod resolve;

pub use config::{default_patterns, JsonSettings, ScanConfig, SettingsProvider};
pub use error::{IndexError, Result};
pub use files::{FileSystem, OsFileSystem};
pub use index::{IndexSnapshot, LocaleIndex, ScanStats, Scanner};
pub use output::{SimpleFormatter, TreeFormatter};
pub use parse::{FallbackParser, JsonParser, LocaleFormat, TranslationEntry, YamlParser};
pub use resolve::{KeyLocator, KeyResolver, Location};
