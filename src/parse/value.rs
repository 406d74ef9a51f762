/// Markers that stand for "no value" in a line-shaped `key: value` pair.
const NULL_MARKERS: &[&str] = &["~", "null", "Null", "NULL"];

/// Returns true if `raw` is empty after trimming or is a null marker.
pub fn is_empty_or_null(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || NULL_MARKERS.contains(&trimmed)
}

/// Interpret a raw scalar token as an entry value.
///
/// One layer of matching surrounding quotes is stripped. An empty token
/// yields `None`, while a quoted empty string (`""`) yields `Some("")`.
pub fn parse_scalar(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Some(strip_quotes(trimmed).to_string())
}

/// Strip one layer of matching `"…"` or `'…'` quotes.
pub fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}
