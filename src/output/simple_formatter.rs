use crate::parse::TranslationEntry;
use crate::resolve::Location;

/// Formatter for simple, machine-readable output (ripgrep-compatible)
pub struct SimpleFormatter;

impl SimpleFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Format entries as `file:line:language:key: 'value'`, one per line
    pub fn format_entries<'a, I>(&self, entries: I) -> String
    where
        I: IntoIterator<Item = &'a TranslationEntry>,
    {
        let mut output = String::new();
        for entry in entries {
            let line = format!(
                "{}:{}:{}: '{}'",
                position(&entry.file.display().to_string(), entry.line),
                entry.language_or_unknown(),
                entry.key,
                entry.value.replace('\n', "\\n")
            );
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    /// Format locations as `file:line`, one per line
    pub fn format_locations(&self, locations: &[Location]) -> String {
        let mut output = String::new();
        for location in locations {
            output.push_str(&position(&location.file.display().to_string(), location.line));
            output.push('\n');
        }
        output
    }

    /// One key per line
    pub fn format_keys(&self, keys: &[&str]) -> String {
        let mut output = String::new();
        for key in keys {
            output.push_str(key);
            output.push('\n');
        }
        output
    }
}

impl Default for SimpleFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn position(file: &str, line: Option<usize>) -> String {
    match line {
        Some(line) => format!("{}:{}", file, line),
        None => format!("{}:-", file),
    }
}
