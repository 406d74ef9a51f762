use hashbrown::HashMap;

use crate::parse::language::{normalize_key, split_language_prefix};
use crate::parse::TranslationEntry;

/// Normalize every entry, then keep one entry per (language, key) pair.
pub fn post_process(entries: Vec<TranslationEntry>) -> Vec<TranslationEntry> {
    deduplicate(entries.into_iter().map(normalize_entry).collect())
}

/// Move a leading language segment out of the key and into `language`.
///
/// `en.user.name` becomes key `user.name`, language `en`. The embedded code
/// wins over a different stored language.
pub fn normalize_entry(entry: TranslationEntry) -> TranslationEntry {
    let key = normalize_key(&entry.key);

    if let Some((code, rest)) = split_language_prefix(&key) {
        let rest = normalize_key(rest);
        if !rest.is_empty() {
            if let Some(stored) = entry.language.as_deref().filter(|stored| *stored != code) {
                log::debug!(
                    "{}: key '{}' overrides language '{}' with '{}'",
                    entry.file.display(),
                    entry.key,
                    stored,
                    code
                );
            }
            return TranslationEntry {
                key: rest,
                language: Some(code),
                ..entry
            };
        }
    }

    TranslationEntry { key, ..entry }
}

/// Keep the last entry seen for each (language or "unknown", key) pair, at the
/// position the pair first appeared.
pub fn deduplicate(entries: Vec<TranslationEntry>) -> Vec<TranslationEntry> {
    let mut slots: HashMap<(String, String), usize> = HashMap::with_capacity(entries.len());
    let mut unique: Vec<TranslationEntry> = Vec::with_capacity(entries.len());

    for entry in entries {
        let pair = (entry.language_or_unknown().to_string(), entry.key.clone());
        match slots.get(&pair) {
            Some(&slot) => unique[slot] = entry,
            None => {
                slots.insert(pair, unique.len());
                unique.push(entry);
            }
        }
    }

    unique
}
