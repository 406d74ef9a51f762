use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use super::dynamic::dynamic_prefix;
use crate::index::IndexSnapshot;
use crate::parse::language::is_language_code;
use crate::parse::TranslationEntry;

/// Dynamic display lookups return at most this many of the most general matches.
pub const DISPLAY_LIMIT: usize = 3;

/// Where a translation entry is defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: Option<usize>,
    pub language: Option<String>,
}

impl From<&TranslationEntry> for Location {
    fn from(entry: &TranslationEntry) -> Self {
        Self {
            file: entry.file.clone(),
            line: entry.line,
            language: entry.language.clone(),
        }
    }
}

/// Read-only key lookups against one index snapshot.
///
/// Lookups never fail: a miss is an empty result, which callers treat as
/// "unknown or not scanned yet".
#[derive(Debug, Clone)]
pub struct KeyResolver {
    snapshot: Arc<IndexSnapshot>,
    language_priority: Vec<String>,
}

impl KeyResolver {
    pub fn new(snapshot: Arc<IndexSnapshot>) -> Self {
        Self {
            snapshot,
            language_priority: Vec::new(),
        }
    }

    pub fn from_entries(entries: Vec<TranslationEntry>) -> Self {
        Self::new(Arc::new(IndexSnapshot::new(entries)))
    }

    /// Languages listed here sort first, in this order.
    pub fn with_language_priority(mut self, priority: Vec<String>) -> Self {
        self.language_priority = priority
            .into_iter()
            .map(|code| code.to_ascii_lowercase())
            .collect();
        self
    }

    pub fn snapshot(&self) -> &IndexSnapshot {
        &self.snapshot
    }

    /// Exact match on `key`; for a dynamic key with no exact match, the single
    /// prefix match whose length is closest to the key's own length.
    pub fn find_by_key(&self, key: &str) -> Vec<&TranslationEntry> {
        let exact = self.snapshot.exact(key);
        if !exact.is_empty() {
            return exact;
        }

        let Some(prefix) = dynamic_prefix(key) else {
            return Vec::new();
        };

        let target = key.len();
        let mut best: Option<&TranslationEntry> = None;
        for entry in self.prefix_matches(prefix) {
            let distance = entry.key.len().abs_diff(target);
            if best.map_or(true, |b| distance < b.key.len().abs_diff(target)) {
                best = Some(entry);
            }
        }
        best.into_iter().collect()
    }

    /// The entry for `key` in the preferred language, else the first entry for `key`.
    pub fn find_exact_key(
        &self,
        key: &str,
        preferred_language: Option<&str>,
    ) -> Option<&TranslationEntry> {
        let hits = self.snapshot.exact(key);
        if let Some(preferred) = preferred_language {
            let preferred_hit = hits.iter().copied().find(|e| {
                e.language
                    .as_deref()
                    .is_some_and(|language| language.eq_ignore_ascii_case(preferred))
            });
            if preferred_hit.is_some() {
                return preferred_hit;
            }
        }
        hits.first().copied()
    }

    /// Entries to show for `key` in hover-style documentation.
    ///
    /// - exact hit: every language's entry, by language priority, then by code
    /// - dynamic key: the `DISPLAY_LIMIT` shortest prefix matches
    /// - otherwise: the same, for the first language-segment rewrite that hits
    pub fn resolve_for_display(&self, key: &str) -> Vec<&TranslationEntry> {
        let direct = self.display_direct(key);
        if !direct.is_empty() {
            return direct;
        }

        let languages = self.known_languages();
        match self.alternative_key(key, &languages) {
            Some(rewritten) => self.display_direct(&rewritten),
            None => Vec::new(),
        }
    }

    /// Retry a missed key with its language segment removed or added.
    ///
    /// If the key starts with one of `language_codes`, only the stripped key is
    /// tried. Otherwise each code is prepended in order and the first hit wins.
    pub fn resolve_alternative<S: AsRef<str>>(
        &self,
        key: &str,
        language_codes: &[S],
    ) -> Vec<&TranslationEntry> {
        let codes: Vec<String> = language_codes
            .iter()
            .map(|code| code.as_ref().to_ascii_lowercase())
            .collect();
        match self.alternative_key(key, &codes) {
            Some(rewritten) => self.find_by_key(&rewritten),
            None => Vec::new(),
        }
    }

    /// Distinct keys starting with `prefix`, sorted, at most `limit`.
    pub fn complete(&self, prefix: &str, limit: usize) -> Vec<&str> {
        self.snapshot
            .entries()
            .iter()
            .filter(|e| e.key.starts_with(prefix))
            .map(|e| e.key.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .take(limit)
            .collect()
    }

    /// Definition sites for `key`, preferred language first.
    pub fn locate(&self, key: &str, preferred_language: Option<&str>) -> Vec<Location> {
        let mut hits = self.snapshot.exact(key);
        if hits.is_empty() {
            hits = self.find_by_key(key);
        }
        if hits.is_empty() {
            let languages = self.known_languages();
            hits = self.resolve_alternative(key, &languages);
        }

        let mut hits = self.order_by_priority(hits);
        if let Some(preferred) = preferred_language {
            hits.sort_by_key(|e| {
                !e.language
                    .as_deref()
                    .is_some_and(|language| language.eq_ignore_ascii_case(preferred))
            });
        }
        hits.into_iter().map(Location::from).collect()
    }

    /// Languages present in the index: priority codes first, the rest alphabetically.
    pub fn known_languages(&self) -> Vec<String> {
        let present = self.snapshot.languages();
        let mut languages: Vec<String> = self
            .language_priority
            .iter()
            .filter(|code| present.contains(&code.as_str()))
            .cloned()
            .collect();
        for code in present {
            if !languages.iter().any(|known| known == code) {
                languages.push(code.to_string());
            }
        }
        languages
    }

    fn display_direct(&self, key: &str) -> Vec<&TranslationEntry> {
        let exact = self.snapshot.exact(key);
        if !exact.is_empty() {
            return self.order_by_priority(exact);
        }

        let Some(prefix) = dynamic_prefix(key) else {
            return Vec::new();
        };
        let mut matches = self.prefix_matches(prefix);
        // stable: keys of equal length keep index order
        matches.sort_by_key(|e| e.key.len());
        matches.truncate(DISPLAY_LIMIT);
        matches
    }

    fn alternative_key(&self, key: &str, codes: &[String]) -> Option<String> {
        if let Some((head, rest)) = key.split_once('.') {
            let head = head.to_ascii_lowercase();
            if is_language_code(&head) && codes.contains(&head) {
                return (!self.find_by_key(rest).is_empty()).then(|| rest.to_string());
            }
        }

        codes
            .iter()
            .map(|code| format!("{}.{}", code, key))
            .find(|candidate| !self.find_by_key(candidate).is_empty())
    }

    fn prefix_matches(&self, prefix: &str) -> Vec<&TranslationEntry> {
        self.snapshot
            .entries()
            .iter()
            .filter(|e| e.key.starts_with(prefix))
            .collect()
    }

    fn order_by_priority<'a>(&self, mut entries: Vec<&'a TranslationEntry>) -> Vec<&'a TranslationEntry> {
        entries.sort_by(|a, b| self.language_rank(a).cmp(&self.language_rank(b)));
        entries
    }

    fn language_rank<'a>(&self, entry: &'a TranslationEntry) -> (usize, bool, &'a str) {
        let language = entry.language.as_deref();
        let position = language
            .and_then(|code| self.language_priority.iter().position(|p| p == code))
            .unwrap_or(self.language_priority.len());
        (position, language.is_none(), language.unwrap_or(""))
    }
}
