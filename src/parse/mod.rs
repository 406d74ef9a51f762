pub mod fallback;
pub mod json_parser;
pub mod language;
pub mod positions;
pub mod translation;
pub mod value;
pub mod yaml_parser;

pub use fallback::FallbackParser;
pub use json_parser::JsonParser;
pub use positions::{build_positions, extract_positions, track_spans, PositionTable};
pub use translation::TranslationEntry;
pub use yaml_parser::{Flattener, YamlParser, MAX_KEY_LENGTH};

use std::path::Path;

/// Structured locale file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleFormat {
    Yaml,
    Json,
}

impl LocaleFormat {
    /// Detect the format from a file extension (`yml`, `yaml`, `json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse one locale file's text into entries, recovering what it can.
///
/// A YAML file the structured reader rejects is re-read line by line. A JSON
/// file that does not parse contributes nothing.
pub fn parse_locale_source(
    content: &str,
    file_path: &Path,
    format: LocaleFormat,
    language_hint: Option<&str>,
) -> Vec<TranslationEntry> {
    match format {
        LocaleFormat::Yaml => match YamlParser::parse_str(content, file_path, language_hint) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("{}", e);
                log::info!("{}: recovering entries line by line", file_path.display());
                FallbackParser::parse(content, file_path, language_hint)
            }
        },
        LocaleFormat::Json => JsonParser::parse_str(content, file_path, language_hint)
            .unwrap_or_else(|e| {
                log::warn!("{}", e);
                Vec::new()
            }),
    }
}
