use regex::Regex;

/// Default translation call-site patterns. Group 1 is the lookup key.
pub fn default_patterns() -> Vec<Regex> {
    vec![
        // Ruby patterns
        Regex::new(r#"I18n\.t\(\s*['"]([^'"]+)['"]"#).unwrap(),
        Regex::new(r#"\bt\(\s*['"]([^'"]+)['"]"#).unwrap(),
        Regex::new(r#"\bt\s+['"]([^'"]+)['"]"#).unwrap(),
        // JavaScript/TypeScript patterns
        Regex::new(r#"i18n\.t\(\s*['"`]([^'"`]+)['"`]"#).unwrap(),
        // Vue patterns
        Regex::new(r#"\$t\(\s*['"`]([^'"`]+)['"`]"#).unwrap(),
    ]
}

/// Matches an unterminated lookup call at the end of a line prefix; group 1 is the typed key.
pub fn partial_call_pattern() -> Regex {
    Regex::new(r#"(?:\bI18n\.t|\bi18n\.t|\$t|\bt)(?:\(\s*|\s+)['"`]([^'"`]*)$"#).unwrap()
}
