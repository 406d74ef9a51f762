//! Language code detection and key normalization helpers.

use std::path::Path;

/// ISO 639-1 two-letter language codes.
const ISO_639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
    "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
    "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
    "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
    "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
    "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
    "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
    "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
    "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
    "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
    "yo", "za", "zh", "zu",
];

/// Returns true if `code` is a two-letter ISO 639-1 code, ignoring case.
pub fn is_language_code(code: &str) -> bool {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return false;
    }
    let lower = code.to_ascii_lowercase();
    ISO_639_1.binary_search(&lower.as_str()).is_ok()
}

/// Infer a language from a file's base name: `ko.yml`, `en_US.yml`, `de.users.yml`.
pub fn language_from_file_name(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let code = name.get(..2)?;
    let separator = name[2..].chars().next()?;
    if (separator == '.' || separator == '_') && is_language_code(code) {
        Some(code.to_ascii_lowercase())
    } else {
        None
    }
}

/// Infer a language from the nearest parent directory, e.g. `locales/en/users.yml`.
pub fn language_from_parent_dir(path: &Path) -> Option<String> {
    let dir = path.parent()?.file_name()?.to_str()?;
    is_language_code(dir).then(|| dir.to_ascii_lowercase())
}

/// Collapse empty and structurally-adjacent duplicate segments: `a..a.b.` -> `a.b`.
pub fn normalize_key(key: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in key.split('.').filter(|s| !s.is_empty()) {
        if segments.last() != Some(&segment) {
            segments.push(segment);
        }
    }
    segments.join(".")
}

/// Split `en.user.name` into `("en", "user.name")` when the leading segment is a language code.
pub fn split_language_prefix(key: &str) -> Option<(String, &str)> {
    let (head, rest) = key.split_once('.')?;
    if rest.is_empty() || !is_language_code(head) {
        return None;
    }
    Some((head.to_ascii_lowercase(), rest))
}
