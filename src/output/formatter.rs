use colored::*;

use crate::parse::TranslationEntry;
use crate::resolve::Location;

/// Formatter for rendering lookup results as a small tree:
///
/// ```text
/// 'user.name' (2 entries)
/// ├─> [en] Name (config/locales/en.yml:3)
/// └─> [ko] Ireum (config/locales/ko.yml:3)
/// ```
pub struct TreeFormatter {
    max_width: usize,
}

impl TreeFormatter {
    /// Create a new TreeFormatter with default width (80 columns)
    pub fn new() -> Self {
        Self { max_width: 80 }
    }

    /// Create a TreeFormatter with custom width
    pub fn with_width(max_width: usize) -> Self {
        Self { max_width }
    }

    /// Format the entries found for one queried key
    pub fn format_entries(&self, query: &str, entries: &[&TranslationEntry]) -> String {
        let mut output = self.header(query, entries.len(), "entry", "entries");
        let count = entries.len();
        for (i, entry) in entries.iter().enumerate() {
            output.push_str(connector(i + 1 == count));

            // dynamic lookups can return a different key than the query
            if entry.key != query {
                output.push_str(&format!("{} ", entry.key.bold()));
            }
            output.push_str(&format!("[{}] ", entry.language_or_unknown().cyan()));
            output.push_str(&self.truncate(&entry.value, self.max_width.saturating_sub(20)));
            output.push_str(&format_position(&entry.file.display().to_string(), entry.line));
            output.push('\n');
        }
        output
    }

    /// Format definition sites for one key
    pub fn format_locations(&self, query: &str, locations: &[Location]) -> String {
        let mut output = self.header(query, locations.len(), "location", "locations");
        let count = locations.len();
        for (i, location) in locations.iter().enumerate() {
            output.push_str(connector(i + 1 == count));
            let language = location.language.as_deref().unwrap_or("unknown");
            output.push_str(&format!("[{}]", language.cyan()));
            output.push_str(&format_position(&location.file.display().to_string(), location.line));
            output.push('\n');
        }
        output
    }

    fn header(&self, query: &str, count: usize, singular: &str, plural: &str) -> String {
        let noun = if count == 1 { singular } else { plural };
        format!("'{}' ({} {})\n", query.bold(), count, noun)
    }

    /// Truncate a string to fit within max length, counted in characters
    fn truncate(&self, s: &str, max_len: usize) -> String {
        let flat = s.replace('\n', "\\n");
        if flat.chars().count() <= max_len {
            flat
        } else {
            let kept: String = flat.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", kept)
        }
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn connector(is_last: bool) -> &'static str {
    if is_last {
        "└─> "
    } else {
        "├─> "
    }
}

fn format_position(file: &str, line: Option<usize>) -> String {
    match line {
        Some(line) => format!(" ({}:{})", file, line),
        None => format!(" ({})", file),
    }
}
