use std::path::{Path, PathBuf};

use super::post_process::post_process;
use crate::config::{is_excluded, ScanConfig};
use crate::error::{IndexError, Result};
use crate::files::{FileSystem, OsFileSystem};
use crate::parse::{parse_locale_source, LocaleFormat, TranslationEntry};

/// Counters for one scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files: usize,
    pub unreadable: usize,
    pub skipped_roots: usize,
    pub entries: usize,
}

/// `Scanner` walks the configured locale roots under a workspace, parses every
/// locale file it finds and returns the post-processed entries.
///
/// Every pass is a full rebuild. Roots are visited in configured order and
/// files in sorted depth-first order, so when two files define the same
/// (language, key) pair the later one wins.
pub struct Scanner<F: FileSystem = OsFileSystem> {
    workspace_root: PathBuf,
    config: ScanConfig,
    fs: F,
}

impl Scanner<OsFileSystem> {
    /// Create a new `Scanner` over the real file system.
    pub fn new(workspace_root: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self::with_file_system(workspace_root, config, OsFileSystem)
    }
}

impl<F: FileSystem> Scanner<F> {
    pub fn with_file_system(workspace_root: impl Into<PathBuf>, config: ScanConfig, fs: F) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            config,
            fs,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Run a full scan pass.
    ///
    /// Per-root and per-file failures are logged and skipped; only a missing
    /// workspace root is an error.
    pub fn scan(&self) -> Result<Vec<TranslationEntry>> {
        self.scan_with_stats().map(|(entries, _)| entries)
    }

    pub fn scan_with_stats(&self) -> Result<(Vec<TranslationEntry>, ScanStats)> {
        if !self.fs.is_dir(&self.workspace_root) {
            return Err(IndexError::path_not_found(&self.workspace_root));
        }

        let mut stats = ScanStats::default();
        let mut entries = Vec::new();

        for root in &self.config.paths {
            if is_excluded(root, &self.config.exclusions) {
                log::debug!("Skipping excluded locale path {}", root.display());
                stats.skipped_roots += 1;
                continue;
            }

            let dir = self.workspace_root.join(root);
            if !self.fs.exists(&dir) {
                if self.config.verbose {
                    log::warn!("{}", IndexError::path_not_found(&dir));
                } else {
                    log::debug!("{}", IndexError::path_not_found(&dir));
                }
                stats.skipped_roots += 1;
                continue;
            }

            let files = if self.fs.is_dir(&dir) {
                self.fs.walk_files(&dir)
            } else {
                vec![dir]
            };

            for file in files {
                let relative = file.strip_prefix(&self.workspace_root).unwrap_or(&file);
                if is_excluded(relative, &self.config.exclusions) {
                    continue;
                }
                let Some(format) = LocaleFormat::from_path(&file) else {
                    continue;
                };

                match self.scan_file(&file, format) {
                    Some(file_entries) => {
                        stats.files += 1;
                        if self.config.verbose {
                            log::info!("{}: {} entries", file.display(), file_entries.len());
                        }
                        entries.extend(file_entries);
                    }
                    None => stats.unreadable += 1,
                }
            }
        }

        let entries = post_process(entries);
        stats.entries = entries.len();

        if self.config.verbose {
            log::info!(
                "Indexed {} entries from {} files ({} unreadable, {} roots skipped)",
                stats.entries,
                stats.files,
                stats.unreadable,
                stats.skipped_roots
            );
        }

        Ok((entries, stats))
    }

    fn scan_file(&self, file: &Path, format: LocaleFormat) -> Option<Vec<TranslationEntry>> {
        let content = match self.fs.read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("{}", IndexError::read(file, e));
                return None;
            }
        };

        Some(parse_locale_source(
            &content,
            file,
            format,
            self.config.default_language.as_deref(),
        ))
    }
}
