use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use super::scanner::{ScanStats, Scanner};
use super::snapshot::IndexSnapshot;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::files::{FileSystem, OsFileSystem};
use crate::parse::TranslationEntry;
use crate::resolve::KeyResolver;

/// The in-memory locale index: a scanner plus the current snapshot.
///
/// `scan` builds a complete new snapshot and swaps it in; readers holding the
/// previous snapshot keep using it until they ask again.
pub struct LocaleIndex<F: FileSystem = OsFileSystem> {
    scanner: Scanner<F>,
    current: RwLock<Arc<IndexSnapshot>>,
}

impl LocaleIndex<OsFileSystem> {
    pub fn new(workspace_root: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self::from_scanner(Scanner::new(workspace_root, config))
    }
}

impl<F: FileSystem> LocaleIndex<F> {
    pub fn from_scanner(scanner: Scanner<F>) -> Self {
        Self {
            scanner,
            current: RwLock::new(Arc::new(IndexSnapshot::default())),
        }
    }

    /// Rebuild the index from disk and return the new entries.
    pub fn scan(&self) -> Result<Vec<TranslationEntry>> {
        self.scan_with_stats().map(|(entries, _)| entries)
    }

    pub fn scan_with_stats(&self) -> Result<(Vec<TranslationEntry>, ScanStats)> {
        let (entries, stats) = self.scanner.scan_with_stats()?;
        let snapshot = Arc::new(IndexSnapshot::new(entries.clone()));
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = snapshot;
        Ok((entries, stats))
    }

    /// The snapshot readers should use right now.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// A resolver over the current snapshot, ordered by the configured language priority.
    pub fn resolver(&self) -> KeyResolver {
        KeyResolver::new(self.snapshot())
            .with_language_priority(self.scanner.config().language_priority.clone())
    }

    pub fn get_entries(&self) -> Vec<TranslationEntry> {
        self.snapshot().entries().to_vec()
    }

    pub fn get_entries_by_language(&self, code: &str) -> Vec<TranslationEntry> {
        self.snapshot()
            .by_language(code)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn find_by_key(&self, key: &str) -> Vec<TranslationEntry> {
        self.resolver()
            .find_by_key(key)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn find_exact_key(&self, key: &str, preferred_language: Option<&str>) -> Option<TranslationEntry> {
        self.resolver()
            .find_exact_key(key, preferred_language)
            .cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
