use regex::Regex;

use crate::config::{default_patterns, partial_call_pattern};

/// Finds the translation key under an editor cursor.
///
/// Columns are 0-based character offsets into the line.
pub struct KeyLocator {
    patterns: Vec<Regex>,
    partial: Regex,
}

impl Default for KeyLocator {
    fn default() -> Self {
        Self::new(default_patterns())
    }
}

impl KeyLocator {
    /// Use custom call-site patterns; group 1 of each must be the key.
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self {
            patterns,
            partial: partial_call_pattern(),
        }
    }

    /// The key of the complete lookup call that spans `column`.
    pub fn key_at(&self, line: &str, column: usize) -> Option<String> {
        let offset = byte_offset(line, column)?;
        self.patterns.iter().find_map(|pattern| {
            pattern.captures_iter(line).find_map(|caps| {
                let call = caps.get(0)?;
                let key = caps.get(1)?;
                // include the closing quote so a cursor resting on it still hits
                let end = (key.end() + 1).min(line.len());
                (call.start() <= offset && offset <= end).then(|| key.as_str().to_string())
            })
        })
    }

    /// The partially typed key of an unterminated lookup call ending at `column`.
    pub fn typed_prefix_at(&self, line: &str, column: usize) -> Option<String> {
        let offset = byte_offset(line, column)?;
        self.partial
            .captures(&line[..offset])
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

fn byte_offset(line: &str, column: usize) -> Option<usize> {
    match line.char_indices().nth(column) {
        Some((offset, _)) => Some(offset),
        None if column == line.chars().count() => Some(line.len()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_at_inside_call() {
        let locator = KeyLocator::default();
        let line = r#"  <%= t("users.title") %> <%= I18n.t('users.name') %>"#;

        assert_eq!(locator.key_at(line, 12).as_deref(), Some("users.title"));
        assert_eq!(locator.key_at(line, 6).as_deref(), Some("users.title"));
        assert_eq!(locator.key_at(line, 42).as_deref(), Some("users.name"));
        assert_eq!(locator.key_at(line, 0), None);
    }

    #[test]
    fn test_key_at_dynamic_and_js() {
        let locator = KeyLocator::default();
        assert_eq!(
            locator.key_at("i18n.t(`user.${role}.label`)", 10).as_deref(),
            Some("user.${role}.label")
        );
        assert_eq!(
            locator.key_at(r#"{{ $t("nav.home") }}"#, 8).as_deref(),
            Some("nav.home")
        );
    }

    #[test]
    fn test_key_at_multibyte_line() {
        let locator = KeyLocator::default();
        let line = r#"제목 = t("page.title")"#;
        assert_eq!(locator.key_at(line, 10).as_deref(), Some("page.title"));
        assert_eq!(locator.key_at(line, 100), None);
    }

    #[test]
    fn test_typed_prefix_at() {
        let locator = KeyLocator::default();
        let line = r#"  = t("users.na"#;
        assert_eq!(locator.typed_prefix_at(line, line.len()).as_deref(), Some("users.na"));
        assert_eq!(locator.typed_prefix_at(line, 9).as_deref(), Some("us"));
        assert_eq!(locator.typed_prefix_at(r#"t("done") "#, 10), None);
    }
}
