//! Test utilities for Chroma crates.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// A throwaway colors tree laid out as `<root>/<namespace>/<name>.<ext>`.
pub struct ColorFixture {
    dir: TempDir,
    extension: String,
}

impl ColorFixture {
    /// Empty fixture using the `txt` extension.
    pub fn new() -> Self {
        Self::with_extension("txt")
    }

    /// Empty fixture using a custom extension.
    pub fn with_extension(extension: &str) -> Self {
        let fixture = Self {
            dir: temp_dir(),
            extension: extension.to_string(),
        };
        std::fs::create_dir_all(fixture.root()).expect("Failed to create colors root");
        fixture
    }

    /// Project directory holding the colors root.
    pub fn project(&self) -> &Path {
        self.dir.path()
    }

    /// The colors root.
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("colors")
    }

    /// Write a color file with the conventional two-line layout.
    pub fn color(self, namespace: &str, name: &str, categories: &str, hex: &str) -> Self {
        let file_name = format!("{name}.{}", self.extension);
        self.raw(namespace, &file_name, &format!("{categories}\n{hex}\n"))
    }

    /// Write an arbitrary file under a namespace directory.
    pub fn raw(self, namespace: &str, file_name: &str, content: &str) -> Self {
        let dir = self.root().join(namespace);
        std::fs::create_dir_all(&dir).expect("Failed to create namespace dir");
        std::fs::write(dir.join(file_name), content).expect("Failed to write color file");
        self
    }

    /// Create an empty namespace directory.
    pub fn namespace(self, namespace: &str) -> Self {
        std::fs::create_dir_all(self.root().join(namespace)).expect("Failed to create namespace dir");
        self
    }
}

impl Default for ColorFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_color_fixture_layout() {
        let fixture = ColorFixture::new()
            .color("reds", "crimson", "warm,bold", "dc143c")
            .namespace("empty");

        let content = std::fs::read_to_string(fixture.root().join("reds/crimson.txt")).unwrap();
        assert_eq!(content, "warm,bold\ndc143c\n");
        assert!(fixture.root().join("empty").is_dir());
    }

    #[test]
    fn test_assert_ok_returns_value() {
        let ok: Result<u8, String> = Ok(3);
        assert_eq!(assert_ok!(ok), 3);
    }

    proptest! {
        #[test]
        fn test_fixture_writes_categories_and_hex(
            categories in "[a-z]{1,8}(,[a-z]{1,8}){0,3}",
            hex in "[0-9a-fA-F]{6}",
        ) {
            let fixture = ColorFixture::new().color("misc", "sample", &categories, &hex);
            let content = std::fs::read_to_string(fixture.root().join("misc/sample.txt")).unwrap();
            prop_assert_eq!(content, format!("{categories}\n{hex}\n"));
        }
    }
}
