//! Colors directory scanner.
//!
//! The scanner never fails. Every problem it meets (a missing root, an
//! unreadable file, a malformed definition, a bad category token) becomes
//! a [`ScanWarning`], is logged, and the offending item is skipped.

use std::fmt;
use std::path::{Path, PathBuf};

use chroma_common_config::ChromaConfig;
use chroma_common_log::spans::Timer;
use tracing::{debug, warn};

use crate::entry::{ColorEntry, ColorFileError};
use crate::table::ColorTable;

/// Default color file extension.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Default size limit for a single color file.
pub const DEFAULT_MAX_FILE_SIZE: usize = 64 * 1024;

/// Scanner settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Extension of color files, without the dot.
    pub extension: String,
    /// Files larger than this are skipped.
    pub max_file_size: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl From<&ChromaConfig> for ScanOptions {
    fn from(config: &ChromaConfig) -> Self {
        Self {
            extension: config.extension.clone(),
            max_file_size: config.max_file_size,
        }
    }
}

/// A recoverable problem found while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// The colors root does not exist or is not a directory.
    RootNotFound { path: PathBuf },
    /// A directory could not be listed.
    UnreadableDirectory { path: PathBuf, reason: String },
    /// The file name is not a valid identifier.
    InvalidColorName { path: PathBuf, name: String },
    /// The file could not be read.
    UnreadableFile { path: PathBuf, reason: String },
    /// The file lacks a category line or a value line.
    Malformed { path: PathBuf },
    /// The value line is not six hex digits.
    InvalidHex { path: PathBuf, value: String },
    /// One category token was dropped.
    InvalidCategory { path: PathBuf, category: String },
    /// Every category token was dropped, so the color was skipped.
    NoValidCategory { path: PathBuf },
    /// A name seen earlier was defined again with a different value.
    Redefined {
        path: PathBuf,
        name: String,
        previous: PathBuf,
    },
}

impl ScanWarning {
    /// Path the warning is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::RootNotFound { path }
            | Self::UnreadableDirectory { path, .. }
            | Self::InvalidColorName { path, .. }
            | Self::UnreadableFile { path, .. }
            | Self::Malformed { path }
            | Self::InvalidHex { path, .. }
            | Self::InvalidCategory { path, .. }
            | Self::NoValidCategory { path }
            | Self::Redefined { path, .. } => path,
        }
    }

    /// Whether the whole file was skipped, rather than a single token.
    pub fn skips_file(&self) -> bool {
        !matches!(self, Self::InvalidCategory { .. } | Self::Redefined { .. })
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "colors directory not found: {}", path.display())
            }
            Self::UnreadableDirectory { path, reason } => {
                write!(f, "failed to list {}: {reason}", path.display())
            }
            Self::InvalidColorName { path, name } => {
                write!(f, "skipping invalid color name '{name}' ({})", path.display())
            }
            Self::UnreadableFile { path, reason } => {
                write!(f, "failed to read color file {}: {reason}", path.display())
            }
            Self::Malformed { path } => write!(
                f,
                "skipping {}: expected a category line followed by a hex value line",
                path.display()
            ),
            Self::InvalidHex { path, value } => {
                write!(f, "invalid hex color format in {}: '{value}'", path.display())
            }
            Self::InvalidCategory { path, category } => {
                write!(f, "skipping invalid color category '{category}' in {}", path.display())
            }
            Self::NoValidCategory { path } => {
                write!(f, "skipping {}: no valid category", path.display())
            }
            Self::Redefined {
                path,
                name,
                previous,
            } => write!(
                f,
                "color '{name}' in {} redefines {} with a different value; the later value wins",
                path.display(),
                previous.display()
            ),
        }
    }
}

/// Result of one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Everything that registered.
    pub table: ColorTable,
    /// Problems found, in discovery order.
    pub warnings: Vec<ScanWarning>,
    /// Candidate color files examined.
    pub files_seen: usize,
    /// Files that registered a color.
    pub files_registered: usize,
}

impl ScanReport {
    fn warn(&mut self, warning: ScanWarning) {
        warn!(path = %warning.path().display(), "{warning}");
        self.warnings.push(warning);
    }

    /// Number of files skipped entirely.
    pub fn files_skipped(&self) -> usize {
        self.files_seen - self.files_registered
    }
}

/// Walks a colors root and builds a [`ColorTable`].
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    options: ScanOptions,
}

impl Scanner {
    /// Scanner for `root` with default options.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan the whole tree.
    ///
    /// Namespace directories and the files in each are visited in
    /// lexicographic order, so "last definition wins" is reproducible.
    pub fn scan(&self) -> ScanReport {
        let timer = Timer::start("scan");
        let mut report = ScanReport::default();

        if !self.root.is_dir() {
            report.warn(ScanWarning::RootNotFound {
                path: self.root.clone(),
            });
            return report;
        }

        match chroma_common_fs::list_dirs(&self.root) {
            Ok(namespaces) => {
                for namespace in namespaces {
                    self.scan_namespace(&namespace, &mut report);
                }
            }
            Err(e) => report.warn(ScanWarning::UnreadableDirectory {
                path: self.root.clone(),
                reason: e.to_string(),
            }),
        }

        timer.finish();
        debug!(
            root = %self.root.display(),
            colors = report.table.len(),
            categories = report.table.category_count(),
            warnings = report.warnings.len(),
            "scan finished"
        );
        report
    }

    fn scan_namespace(&self, dir: &Path, report: &mut ScanReport) {
        let files = match chroma_common_fs::list_files_with_extension(dir, &self.options.extension) {
            Ok(files) => files,
            Err(e) => {
                report.warn(ScanWarning::UnreadableDirectory {
                    path: dir.to_path_buf(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        for file in files {
            report.files_seen += 1;
            if self.scan_file(&file, report) {
                report.files_registered += 1;
            }
        }
    }

    fn scan_file(&self, path: &Path, report: &mut ScanReport) -> bool {
        let name = chroma_common_fs::file_stem(path).unwrap_or_default();

        // Checked before reading so a bad name never costs a read
        if !crate::color::is_identifier(&name) {
            report.warn(ScanWarning::InvalidColorName {
                path: path.to_path_buf(),
                name,
            });
            return false;
        }

        let content = match chroma_common_fs::read_to_string(path, self.options.max_file_size) {
            Ok(content) => content,
            Err(e) => {
                report.warn(ScanWarning::UnreadableFile {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                return false;
            }
        };

        let parsed = match ColorEntry::parse(&name, &content, path) {
            Ok(parsed) => parsed,
            Err(e) => {
                let warning = match e {
                    ColorFileError::InvalidName(name) => ScanWarning::InvalidColorName {
                        path: path.to_path_buf(),
                        name,
                    },
                    ColorFileError::Incomplete => ScanWarning::Malformed {
                        path: path.to_path_buf(),
                    },
                    ColorFileError::InvalidHex(value) => ScanWarning::InvalidHex {
                        path: path.to_path_buf(),
                        value,
                    },
                    ColorFileError::NoValidCategory { rejected, .. } => {
                        for category in rejected {
                            report.warn(ScanWarning::InvalidCategory {
                                path: path.to_path_buf(),
                                category,
                            });
                        }
                        ScanWarning::NoValidCategory {
                            path: path.to_path_buf(),
                        }
                    }
                };
                report.warn(warning);
                return false;
            }
        };

        for category in parsed.rejected_categories {
            report.warn(ScanWarning::InvalidCategory {
                path: path.to_path_buf(),
                category,
            });
        }

        let value = parsed.entry.value();
        if let Some(previous) = report.table.insert(parsed.entry) {
            if previous.value() != value {
                report.warn(ScanWarning::Redefined {
                    path: path.to_path_buf(),
                    name,
                    previous: previous.source().to_path_buf(),
                });
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_test_utils::ColorFixture;

    #[test]
    fn test_scan_registers_colors() {
        let fixture = ColorFixture::new()
            .color("reds", "crimson", "warm,bold", "dc143c")
            .color("blues", "navy", "cool", "000080");

        let report = Scanner::new(fixture.root()).scan();

        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.files_seen, 2);
        assert_eq!(report.files_registered, 2);
        assert_eq!(report.table.len(), 2);
        assert_eq!(report.table.category_count(), 3);
    }

    #[test]
    fn test_missing_root_is_a_warning() {
        let fixture = ColorFixture::new();
        let missing = fixture.project().join("nope");

        let report = Scanner::new(&missing).scan();

        assert!(report.table.is_empty());
        assert_eq!(report.warnings, vec![ScanWarning::RootNotFound { path: missing }]);
    }

    #[test]
    fn test_directory_names_are_not_categories() {
        let fixture = ColorFixture::new().color("reds", "crimson", "warm", "dc143c");

        let report = Scanner::new(fixture.root()).scan();

        assert!(report.table.category("reds").is_none());
        assert!(report.table.get("warm", "crimson").is_some());
    }

    #[test]
    fn test_files_at_root_and_other_extensions_are_ignored() {
        let fixture = ColorFixture::new()
            .color("reds", "crimson", "warm", "dc143c")
            .raw("reds", "notes.md", "warm\nffffff");
        std::fs::write(fixture.root().join("stray.txt"), "warm\n123456").unwrap();

        let report = Scanner::new(fixture.root()).scan();

        assert_eq!(report.files_seen, 1);
        assert_eq!(report.table.len(), 1);
    }

    #[test]
    fn test_custom_extension() {
        let fixture = ColorFixture::with_extension("color")
            .color("reds", "crimson", "warm", "dc143c")
            .raw("reds", "ignored.txt", "warm\n123456");

        let options = ScanOptions {
            extension: "color".to_string(),
            ..Default::default()
        };
        let report = Scanner::new(fixture.root()).with_options(options).scan();

        assert_eq!(report.table.len(), 1);
        assert!(report.table.color("crimson").is_some());
    }

    #[test]
    fn test_bad_files_are_skipped_with_warnings() {
        let fixture = ColorFixture::new()
            .color("misc", "good", "ok", "abcdef")
            .raw("misc", "bad!name.txt", "ok\n123456")
            .raw("misc", "badhex.txt", "ok\nzzzzzz")
            .raw("misc", "empty.txt", "")
            .raw("misc", "onlyone.txt", "ok")
            .raw("misc", "nocats.txt", "bad-one\n123456");

        let report = Scanner::new(fixture.root()).scan();

        assert_eq!(report.table.len(), 1);
        assert!(report.table.color("good").is_some());
        assert_eq!(report.files_seen, 6);
        assert_eq!(report.files_skipped(), 5);

        let misc = fixture.root().join("misc");
        assert!(report.warnings.contains(&ScanWarning::InvalidColorName {
            path: misc.join("bad!name.txt"),
            name: "bad!name".to_string(),
        }));
        assert!(report.warnings.contains(&ScanWarning::InvalidHex {
            path: misc.join("badhex.txt"),
            value: "zzzzzz".to_string(),
        }));
        assert!(report.warnings.contains(&ScanWarning::Malformed {
            path: misc.join("empty.txt"),
        }));
        assert!(report.warnings.contains(&ScanWarning::Malformed {
            path: misc.join("onlyone.txt"),
        }));
        assert!(report.warnings.contains(&ScanWarning::InvalidCategory {
            path: misc.join("nocats.txt"),
            category: "bad-one".to_string(),
        }));
        assert!(report.warnings.contains(&ScanWarning::NoValidCategory {
            path: misc.join("nocats.txt"),
        }));
    }

    #[test]
    fn test_partial_categories_still_register() {
        let fixture = ColorFixture::new().color("misc", "teal", "cool,not-ok", "008080");

        let report = Scanner::new(fixture.root()).scan();

        assert!(report.table.get("cool", "teal").is_some());
        assert!(report.table.category("not-ok").is_none());
        assert_eq!(report.files_registered, 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(!report.warnings[0].skips_file());
    }

    #[test]
    fn test_oversized_file_is_skipped() {
        let fixture = ColorFixture::new()
            .raw("misc", "huge.txt", &format!("ok\n123456\n{}", "x".repeat(128)));

        let options = ScanOptions {
            max_file_size: 16,
            ..Default::default()
        };
        let report = Scanner::new(fixture.root()).with_options(options).scan();

        assert!(report.table.is_empty());
        assert!(matches!(report.warnings[..], [ScanWarning::UnreadableFile { .. }]));
    }

    #[test]
    fn test_later_namespace_wins_and_warns() {
        let fixture = ColorFixture::new()
            .color("a_first", "accent", "warm", "ff0000")
            .color("b_second", "accent", "cool", "0000ff");

        let report = Scanner::new(fixture.root()).scan();

        assert_eq!(report.table.color("accent").map(|e| e.value().value()), Some(0x0000ff));
        assert_eq!(report.table.get("warm", "accent").map(|e| e.value().value()), Some(0x0000ff));
        assert!(report.table.get("cool", "accent").is_some());
        assert_eq!(
            report.warnings,
            vec![ScanWarning::Redefined {
                path: fixture.root().join("b_second/accent.txt"),
                name: "accent".to_string(),
                previous: fixture.root().join("a_first/accent.txt"),
            }]
        );
    }

    #[test]
    fn test_identical_redefinition_is_silent() {
        let fixture = ColorFixture::new()
            .color("a", "white", "light", "ffffff")
            .color("b", "white", "neutral", "FFFFFF");

        let report = Scanner::new(fixture.root()).scan();

        assert!(report.warnings.is_empty());
        assert_eq!(report.table.category_count(), 2);
    }

    #[test]
    fn test_empty_namespace_contributes_nothing() {
        let fixture = ColorFixture::new().namespace("empty");

        let report = Scanner::new(fixture.root()).scan();

        assert!(report.table.is_empty());
        assert_eq!(report.table.category_count(), 0);
        assert!(report.warnings.is_empty());
    }
}
