pub mod exclusions;
pub mod patterns;
pub mod settings;

pub use exclusions::{default_exclusions, is_excluded};
pub use patterns::{default_patterns, partial_call_pattern};
pub use settings::{JsonSettings, ScanConfig, SettingsProvider, DEFAULT_LOCALE_PATHS};
