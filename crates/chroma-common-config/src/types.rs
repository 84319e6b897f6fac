//! Configuration types.

use std::path::{Path, PathBuf};

use chroma_common_core::FormatKind;
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaConfig {
    /// Root directory holding one namespace directory per color group.
    pub colors_dir: PathBuf,
    /// Extension of color files, without the leading dot.
    pub extension: String,
    /// Color files larger than this are skipped.
    pub max_file_size: usize,
    /// Generated documents, one per format.
    pub outputs: Vec<OutputConfig>,
    /// External bundler settings.
    pub bundle: BundleConfig,
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            colors_dir: PathBuf::from("colors"),
            extension: "txt".to_string(),
            max_file_size: 64 * 1024,
            outputs: FormatKind::ALL
                .iter()
                .map(|&format| OutputConfig::in_dir("builds", format))
                .collect(),
            bundle: BundleConfig::default(),
        }
    }
}

impl ChromaConfig {
    /// Output settings for `format`, if configured.
    pub fn output_for(&self, format: FormatKind) -> Option<&OutputConfig> {
        self.outputs.iter().find(|o| o.format == format)
    }

    /// Make every relative path absolute against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        resolve(&mut self.colors_dir, base);
        resolve(&mut self.bundle.dist_dir, base);
        for output in &mut self.outputs {
            resolve(&mut output.path, base);
        }
    }

    /// Point every output at `dir`, keeping each file name.
    pub fn relocate_outputs(&mut self, dir: &Path) {
        for output in &mut self.outputs {
            let file_name = output
                .path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(output.format.default_file_name()));
            output.path = dir.join(file_name);
        }
    }
}

fn resolve(path: &mut PathBuf, base: &Path) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}

/// Where one format's generated document is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output representation.
    pub format: FormatKind,
    /// Target file of the generated document.
    pub path: PathBuf,
}

impl OutputConfig {
    /// Output for `format` using its default file name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>, format: FormatKind) -> Self {
        Self {
            format,
            path: dir.as_ref().join(format.default_file_name()),
        }
    }
}

/// External bundler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Run the bundler after emitting.
    pub enabled: bool,
    /// Root of the distributable tree; each format gets a subdirectory.
    pub dist_dir: PathBuf,
    /// Bundler executable.
    pub bundler: String,
    /// Generate type declarations after bundling.
    pub declarations: bool,
    /// Declaration generator executable.
    pub declaration_tool: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dist_dir: PathBuf::from("dist"),
            bundler: "esbuild".to_string(),
            declarations: true,
            declaration_tool: "tsc".to_string(),
        }
    }
}
