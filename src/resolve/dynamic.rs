//! Keys with embedded interpolation, e.g. `user.greeting.#{type}`.

/// Interpolation markers: Ruby `#{…}` and JavaScript template `${…}`.
pub const DYNAMIC_MARKERS: &[&str] = &["#{", "${"];

const SEPARATORS: &[char] = &['.', '_', '-', ':', '/'];

/// Returns true if the key contains an interpolation marker.
pub fn is_dynamic(key: &str) -> bool {
    DYNAMIC_MARKERS.iter().any(|marker| key.contains(marker))
}

/// The static part of a dynamic key: everything before the first marker,
/// without trailing separators. `None` for static keys or an empty prefix.
pub fn dynamic_prefix(key: &str) -> Option<&str> {
    let cut = DYNAMIC_MARKERS
        .iter()
        .filter_map(|marker| key.find(marker))
        .min()?;
    let prefix = key[..cut].trim_end_matches(SEPARATORS);
    (!prefix.is_empty()).then_some(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dynamic() {
        assert!(is_dynamic("user.greeting.#{type}"));
        assert!(is_dynamic("user.${role}.label"));
        assert!(!is_dynamic("user.greeting.formal"));
        assert!(!is_dynamic("price.$"));
    }

    #[test]
    fn test_dynamic_prefix() {
        assert_eq!(dynamic_prefix("user.greeting.#{type}"), Some("user.greeting"));
        assert_eq!(dynamic_prefix("user.greeting_#{type}"), Some("user.greeting"));
        assert_eq!(dynamic_prefix("a.${x}.b.#{y}"), Some("a"));
        assert_eq!(dynamic_prefix("#{scope}.title"), None);
        assert_eq!(dynamic_prefix("user.name"), None);
    }
}
