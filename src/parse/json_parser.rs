use serde_json::Value;
use std::path::Path;
use yaml_rust::yaml::Hash;
use yaml_rust::Yaml;

use super::positions::track_spans;
use super::translation::TranslationEntry;
use super::yaml_parser::Flattener;
use crate::error::{IndexError, Result};

/// Parser for JSON translation files
pub struct JsonParser;

impl JsonParser {
    /// Parse and flatten JSON (or JSONC) text.
    ///
    /// Language roots and file-name inference work exactly as for YAML.
    /// Line numbers come from the YAML event reader, which accepts most JSON.
    pub fn parse_str(
        content: &str,
        file_path: &Path,
        language_hint: Option<&str>,
    ) -> Result<Vec<TranslationEntry>> {
        // Strip comments to support JSONC (JSON with Comments) format
        let cleaned_content = Self::strip_json_comments(content);

        let root: Value = serde_json::from_str(&cleaned_content).map_err(|e| {
            IndexError::json_parse(file_path, format!("Invalid JSON syntax: {}", e))
        })?;

        let positions = track_spans(&cleaned_content).unwrap_or_default();
        let flattener = Flattener::new(file_path, &positions);
        Ok(flattener.flatten_document(&to_yaml(root), language_hint))
    }

    /// Strip single-line (//) and multi-line (/* */) comments from JSON
    /// This enables parsing of JSONC (JSON with Comments) files
    fn strip_json_comments(content: &str) -> String {
        let mut result = String::with_capacity(content.len());
        let mut chars = content.chars().peekable();
        let mut in_string = false;
        let mut escape_next = false;

        while let Some(ch) = chars.next() {
            if escape_next {
                result.push(ch);
                escape_next = false;
                continue;
            }

            if ch == '\\' && in_string {
                result.push(ch);
                escape_next = true;
                continue;
            }

            if ch == '"' {
                in_string = !in_string;
                result.push(ch);
                continue;
            }

            if !in_string && ch == '/' {
                match chars.peek() {
                    Some('/') => {
                        for c in chars.by_ref() {
                            if c == '\n' {
                                result.push('\n'); // preserve newline for line counting
                                break;
                            }
                        }
                        continue;
                    }
                    Some('*') => {
                        chars.next();
                        let mut prev = ' ';
                        for c in chars.by_ref() {
                            if prev == '*' && c == '/' {
                                break;
                            }
                            if c == '\n' {
                                result.push('\n');
                            }
                            prev = c;
                        }
                        continue;
                    }
                    _ => {}
                }
            }

            result.push(ch);
        }

        result
    }
}

/// Convert a JSON tree into the YAML node shape the flattener walks.
fn to_yaml(value: Value) -> Yaml {
    match value {
        Value::Object(map) => {
            let mut hash = Hash::new();
            for (key, val) in map {
                hash.insert(Yaml::String(key), to_yaml(val));
            }
            Yaml::Hash(hash)
        }
        Value::Array(items) => Yaml::Array(items.into_iter().map(to_yaml).collect()),
        Value::String(s) => Yaml::String(s),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Yaml::Integer(i),
            None => Yaml::Real(n.to_string()),
        },
        Value::Bool(b) => Yaml::Boolean(b),
        Value::Null => Yaml::Null,
    }
}
