use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::exclusions::default_exclusions;
use crate::error::{IndexError, Result};
use crate::parse::language::is_language_code;

pub const LOCALE_PATHS_KEY: &str = "localePaths";
pub const EXCLUDE_PATTERNS_KEY: &str = "excludePatterns";
pub const VERBOSE_KEY: &str = "verbose";
pub const LANGUAGE_PRIORITY_KEY: &str = "languagePriority";
pub const DEFAULT_LANGUAGE_KEY: &str = "defaultLanguage";

/// Directories scanned when `localePaths` is not configured.
pub const DEFAULT_LOCALE_PATHS: &[&str] = &["config/locales", "src/i18n", "locales", "i18n"];

/// A simple key→value settings source.
pub trait SettingsProvider {
    fn get(&self, key: &str) -> Option<String>;
}

impl SettingsProvider for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Settings read from a flat JSON object. Arrays are exposed comma-joined.
#[derive(Debug, Clone, Default)]
pub struct JsonSettings {
    values: Map<String, Value>,
}

impl JsonSettings {
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(content)? {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(IndexError::Settings(
                "settings file must contain a JSON object".to_string(),
            )),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| IndexError::read(path, e))?;
        Self::parse(&content)
    }
}

impl SettingsProvider for JsonSettings {
    fn get(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => Some(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => Some(other.to_string()),
        }
    }
}

/// Typed scan configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Workspace-relative directories (or files) to scan, in priority order
    pub paths: Vec<PathBuf>,
    /// Paths containing any of these markers are skipped
    pub exclusions: Vec<String>,
    /// Log per-file diagnostics
    pub verbose: bool,
    /// Preferred languages, most preferred first
    pub language_priority: Vec<String>,
    /// Language assumed for files that carry no language signal of their own
    pub default_language: Option<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            paths: DEFAULT_LOCALE_PATHS.iter().map(PathBuf::from).collect(),
            exclusions: default_exclusions().iter().map(|s| s.to_string()).collect(),
            verbose: false,
            language_priority: vec!["en".to_string()],
            default_language: None,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from a settings provider; unset keys keep their defaults.
    pub fn from_settings(settings: &dyn SettingsProvider) -> Result<Self> {
        let mut config = Self::default();

        if let Some(paths) = settings.get(LOCALE_PATHS_KEY) {
            config.paths = split_list(&paths).into_iter().map(PathBuf::from).collect();
        }
        if let Some(exclusions) = settings.get(EXCLUDE_PATTERNS_KEY) {
            config.exclusions = split_list(&exclusions);
        }
        if let Some(verbose) = settings.get(VERBOSE_KEY) {
            config.verbose = parse_bool(&verbose)?;
        }
        if let Some(priority) = settings.get(LANGUAGE_PRIORITY_KEY) {
            config.language_priority = split_list(&priority)
                .into_iter()
                .map(|code| code.to_ascii_lowercase())
                .collect();
        }
        if let Some(language) = settings.get(DEFAULT_LANGUAGE_KEY) {
            let language = language.trim();
            if !language.is_empty() {
                if !is_language_code(language) {
                    return Err(IndexError::Settings(format!(
                        "{} '{}' is not a two-letter language code",
                        DEFAULT_LANGUAGE_KEY, language
                    )));
                }
                config.default_language = Some(language.to_ascii_lowercase());
            }
        }

        Ok(config)
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_exclusions(mut self, exclusions: Vec<String>) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_language_priority(mut self, priority: Vec<String>) -> Self {
        self.language_priority = priority
            .into_iter()
            .map(|code| code.to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_default_language(mut self, language: Option<String>) -> Self {
        self.default_language = language.map(|code| code.to_ascii_lowercase());
        self
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(IndexError::Settings(format!(
            "{} must be true or false, got '{}'",
            VERBOSE_KEY, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.paths[0], PathBuf::from("config/locales"));
        assert!(config.exclusions.contains(&"tmp".to_string()));
        assert!(!config.verbose);
        assert_eq!(config.language_priority, vec!["en".to_string()]);
    }

    #[test]
    fn test_from_map_settings() {
        let mut settings = HashMap::new();
        settings.insert(LOCALE_PATHS_KEY.to_string(), "app/locales, vendor/locales".to_string());
        settings.insert(VERBOSE_KEY.to_string(), "true".to_string());
        settings.insert(LANGUAGE_PRIORITY_KEY.to_string(), "KO,en".to_string());

        let config = ScanConfig::from_settings(&settings).unwrap();
        assert_eq!(
            config.paths,
            vec![PathBuf::from("app/locales"), PathBuf::from("vendor/locales")]
        );
        assert!(config.verbose);
        assert_eq!(config.language_priority, vec!["ko".to_string(), "en".to_string()]);
        assert!(config.exclusions.contains(&"node_modules".to_string()));
    }

    #[test]
    fn test_from_json_settings() {
        let settings = JsonSettings::parse(
            r#"{"localePaths": ["config/locales"], "excludePatterns": ["tmp", "backup"], "verbose": false, "defaultLanguage": "ja"}"#,
        )
        .unwrap();
        let config = ScanConfig::from_settings(&settings).unwrap();
        assert_eq!(config.paths, vec![PathBuf::from("config/locales")]);
        assert_eq!(config.exclusions, vec!["tmp".to_string(), "backup".to_string()]);
        assert!(!config.verbose);
        assert_eq!(config.default_language.as_deref(), Some("ja"));
    }

    #[test]
    fn test_invalid_settings() {
        let settings = JsonSettings::parse(r#"{"verbose": "sometimes"}"#).unwrap();
        assert!(matches!(
            ScanConfig::from_settings(&settings),
            Err(IndexError::Settings(_))
        ));

        let settings = JsonSettings::parse(r#"{"defaultLanguage": "english"}"#).unwrap();
        assert!(ScanConfig::from_settings(&settings).is_err());

        assert!(JsonSettings::parse("[1, 2]").is_err());
        assert!(matches!(JsonSettings::parse("{"), Err(IndexError::Json(_))));
    }
}
