//! Common test utilities for CLI testing.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use chroma_test_utils::ColorFixture;

/// Test context with a colors tree in a temporary project directory
pub struct TestContext {
    pub fixture: ColorFixture,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            fixture: ColorFixture::new(),
        }
    }

    /// Add a color file
    pub fn color(self, namespace: &str, name: &str, categories: &str, hex: &str) -> Self {
        Self {
            fixture: self.fixture.color(namespace, name, categories, hex),
        }
    }

    /// Add an arbitrary file under a namespace
    pub fn raw(self, namespace: &str, file_name: &str, content: &str) -> Self {
        Self {
            fixture: self.fixture.raw(namespace, file_name, content),
        }
    }

    /// Write `chroma.yaml` in the project directory
    pub fn with_config(self, yaml: &str) -> Self {
        std::fs::write(self.path().join("chroma.yaml"), yaml).expect("Failed to write config");
        self
    }

    /// Get path to the project directory
    pub fn path(&self) -> &Path {
        self.fixture.project()
    }

    /// Default location of a generated module
    pub fn build_output(&self, file_name: &str) -> PathBuf {
        self.path().join("builds").join(file_name)
    }

    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.path().join(path)).expect("Failed to read output")
    }

    /// Create a command configured for this context
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("chroma").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("CHROMA_CONFIG")
            .env_remove("CHROMA_COLORS_DIR")
            .env_remove("CHROMA_OUT_DIR")
            .env_remove("CHROMA_DIST_DIR")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
