use std::path::Path;
use yaml_rust::{Yaml, YamlLoader};

use super::language::{
    is_language_code, language_from_file_name, language_from_parent_dir, normalize_key,
};
use super::positions::{build_positions, PositionTable};
use super::translation::TranslationEntry;
use crate::error::{IndexError, Result};

/// Flattened keys longer than this are skipped.
pub const MAX_KEY_LENGTH: usize = 200;

/// Parser for YAML translation files
pub struct YamlParser;

impl YamlParser {
    /// Read and parse a YAML file, inferring its language from its path.
    pub fn parse_file(file_path: &Path) -> Result<Vec<TranslationEntry>> {
        let content =
            std::fs::read_to_string(file_path).map_err(|e| IndexError::read(file_path, e))?;
        Self::parse_str(&content, file_path, None)
    }

    /// Parse and flatten YAML text. Only the first document is read.
    ///
    /// A structural failure is returned as [`IndexError::YamlParse`] so the
    /// caller can fall back to line recovery.
    pub fn parse_str(
        content: &str,
        file_path: &Path,
        language_hint: Option<&str>,
    ) -> Result<Vec<TranslationEntry>> {
        let docs = YamlLoader::load_from_str(content).map_err(|e| {
            let marker = e.marker();
            IndexError::yaml_parse(file_path, marker.line(), marker.col() + 1, e.to_string())
        })?;

        let positions = build_positions(content);
        let flattener = Flattener::new(file_path, &positions);

        Ok(docs
            .first()
            .map(|doc| flattener.flatten_document(doc, language_hint))
            .unwrap_or_default())
    }
}

/// Walks a parsed mapping tree and emits one entry per scalar leaf.
pub struct Flattener<'a> {
    file_path: &'a Path,
    positions: &'a PositionTable,
}

impl<'a> Flattener<'a> {
    pub fn new(file_path: &'a Path, positions: &'a PositionTable) -> Self {
        Self {
            file_path,
            positions,
        }
    }

    /// Flatten a document root.
    ///
    /// Top-level language-code keys holding a mapping are language roots: their
    /// subtree is flattened with an empty prefix under that language, and the
    /// key never becomes part of an entry key. Every other top-level key uses
    /// the hint, or failing that the language inferred from the file path.
    pub fn flatten_document(&self, doc: &Yaml, language_hint: Option<&str>) -> Vec<TranslationEntry> {
        let mut entries = Vec::new();
        let Yaml::Hash(root) = doc else {
            log::debug!("{}: document root is not a mapping", self.file_path.display());
            return entries;
        };

        let file_language = language_hint
            .map(str::to_ascii_lowercase)
            .or_else(|| language_from_file_name(self.file_path))
            .or_else(|| language_from_parent_dir(self.file_path));

        for (key, value) in root {
            let Some(key) = key_text(key) else {
                continue;
            };

            if is_language_code(&key) && matches!(value, Yaml::Hash(_)) {
                let language = key.to_ascii_lowercase();
                self.walk(value, "", &key, Some(&language), &mut entries);
            } else {
                self.visit(&key, value, "", "", file_language.as_deref(), &mut entries);
            }
        }

        entries
    }

    fn walk(
        &self,
        node: &Yaml,
        prefix: &str,
        raw_prefix: &str,
        language: Option<&str>,
        entries: &mut Vec<TranslationEntry>,
    ) {
        if let Yaml::Hash(hash) = node {
            for (key, value) in hash {
                if let Some(key) = key_text(key) {
                    self.visit(&key, value, prefix, raw_prefix, language, entries);
                }
            }
        }
    }

    fn visit(
        &self,
        key: &str,
        value: &Yaml,
        prefix: &str,
        raw_prefix: &str,
        language: Option<&str>,
        entries: &mut Vec<TranslationEntry>,
    ) {
        let new_key = normalize_key(&join(prefix, key));
        let raw_path = join(raw_prefix, key);
        if new_key.is_empty() {
            return;
        }

        let text = match value {
            Yaml::Hash(_) => {
                self.walk(value, &new_key, &raw_path, language, entries);
                return;
            }
            Yaml::String(s) => s.clone(),
            Yaml::Integer(i) => i.to_string(),
            Yaml::Real(r) => r.clone(),
            Yaml::Boolean(b) => b.to_string(),
            Yaml::Array(_) => {
                log::debug!("{}: skipping sequence at '{}'", self.file_path.display(), raw_path);
                return;
            }
            _ => return,
        };

        if new_key.chars().count() > MAX_KEY_LENGTH {
            log::warn!(
                "{}: {}",
                self.file_path.display(),
                IndexError::key_too_long(new_key)
            );
            return;
        }

        let line = self
            .positions
            .exact(&raw_path)
            .or_else(|| self.positions.lookup(&new_key));

        entries.push(TranslationEntry::new(
            new_key,
            text,
            language.map(str::to_string),
            self.file_path,
            line,
        ));
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Mapping keys may be plain scalars of any type; `404: Not found` is a valid key.
fn key_text(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Real(r) => Some(r.clone()),
        Yaml::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}
