use hashbrown::HashMap;

use crate::parse::TranslationEntry;

/// An immutable, finished index with a key lookup table.
#[derive(Debug, Default)]
pub struct IndexSnapshot {
    entries: Vec<TranslationEntry>,
    by_key: HashMap<String, Vec<usize>>,
}

impl IndexSnapshot {
    pub fn new(entries: Vec<TranslationEntry>) -> Self {
        let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
        for (slot, entry) in entries.iter().enumerate() {
            by_key.entry(entry.key.clone()).or_default().push(slot);
        }
        Self { entries, by_key }
    }

    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries with exactly this key, in index order.
    pub fn exact(&self, key: &str) -> Vec<&TranslationEntry> {
        self.by_key
            .get(key)
            .map(|slots| slots.iter().map(|&slot| &self.entries[slot]).collect())
            .unwrap_or_default()
    }

    /// All entries in the given language (case-insensitive).
    pub fn by_language(&self, code: &str) -> Vec<&TranslationEntry> {
        self.entries
            .iter()
            .filter(|e| {
                e.language
                    .as_deref()
                    .is_some_and(|language| language.eq_ignore_ascii_case(code))
            })
            .collect()
    }

    /// Distinct languages present in the index, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self
            .entries
            .iter()
            .filter_map(|e| e.language.as_deref())
            .collect();
        languages.sort_unstable();
        languages.dedup();
        languages
    }
}
