use std::path::Path;

use super::language::{language_from_file_name, language_from_parent_dir, normalize_key};
use super::positions::{line_indent, KeyLine};
use super::translation::TranslationEntry;
use super::value::{is_empty_or_null, parse_scalar};
use super::yaml_parser::MAX_KEY_LENGTH;
use crate::error::IndexError;

/// Line-oriented recovery for YAML files the structured reader rejects.
///
/// Every `key: value` line becomes an entry keyed by the open sections plus
/// its own key. Lines that do not have that shape are skipped, so one broken
/// block costs only its own lines.
pub struct FallbackParser;

impl FallbackParser {
    pub fn parse(
        content: &str,
        file_path: &Path,
        language_hint: Option<&str>,
    ) -> Vec<TranslationEntry> {
        let language = language_hint
            .map(str::to_ascii_lowercase)
            .or_else(|| language_from_file_name(file_path))
            .or_else(|| language_from_parent_dir(file_path));

        let mut entries = Vec::new();
        // (indent, key) of every open section, outermost first
        let mut sections: Vec<(usize, &str)> = Vec::new();
        let mut lines = content.lines().enumerate().peekable();

        while let Some((idx, raw)) = lines.next() {
            let Some(line) = KeyLine::parse(raw) else {
                continue;
            };

            while sections
                .last()
                .is_some_and(|(indent, _)| *indent >= line.indent)
            {
                sections.pop();
            }

            let value = if line.opens_block_scalar() {
                let mut body: Vec<&str> = Vec::new();
                while let Some(&(_, next)) = lines.peek() {
                    match line_indent(next) {
                        None => body.push(""),
                        Some(indent) if indent > line.indent => body.push(next.trim()),
                        Some(_) => break,
                    }
                    lines.next();
                }
                while body.last() == Some(&"") {
                    body.pop();
                }
                let separator = if line.rest.starts_with('>') { " " } else { "\n" };
                body.join(separator)
            } else if is_empty_or_null(line.rest) {
                sections.push((line.indent, line.key));
                continue;
            } else {
                match parse_scalar(line.rest) {
                    Some(value) => value,
                    None => continue,
                }
            };

            let path: Vec<&str> = sections
                .iter()
                .map(|(_, key)| *key)
                .chain(std::iter::once(line.key))
                .collect();
            let key = normalize_key(&path.join("."));
            if key.is_empty() {
                continue;
            }
            if key.chars().count() > MAX_KEY_LENGTH {
                log::warn!("{}: {}", file_path.display(), IndexError::key_too_long(key));
                continue;
            }

            entries.push(TranslationEntry::new(
                key,
                value,
                language.clone(),
                file_path,
                Some(idx + 1),
            ));
        }

        entries
    }
}
