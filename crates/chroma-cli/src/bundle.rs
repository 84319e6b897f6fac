//! External bundler integration.
//!
//! Each generated document is handed to a bundler program that produces
//! an ES module (`index.js`) and a CommonJS module (`index.cjs`) in the
//! format's dist subdirectory, followed by optional type declarations.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use chroma_common_config::BundleConfig;
use chroma_palette::EmittedDocument;
use serde::Serialize;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Stderr kept from a failed tool run.
const MAX_STDERR: usize = 4 * 1024;

/// Bundling errors.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {}: {stderr}", code.map(|c| c.to_string()).unwrap_or_else(|| "a signal".to_string()))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to prepare {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Files produced for one format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleOutput {
    pub dist_dir: PathBuf,
    pub esm: PathBuf,
    pub cjs: PathBuf,
    /// Set when declaration generation succeeded.
    pub declarations: Option<PathBuf>,
}

/// Turns a generated document into distributable modules.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, document: &EmittedDocument, dist_dir: &Path) -> Result<BundleOutput, BundleError>;
}

/// Bundler backed by external programs (`esbuild` and `tsc` by default).
#[derive(Debug, Clone)]
pub struct CommandBundler {
    program: String,
    declaration_tool: Option<String>,
}

impl CommandBundler {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            declaration_tool: None,
        }
    }

    pub fn with_declarations(mut self, tool: impl Into<String>) -> Self {
        self.declaration_tool = Some(tool.into());
        self
    }

    pub fn from_config(config: &BundleConfig) -> Self {
        let bundler = Self::new(&config.bundler);
        if config.declarations {
            bundler.with_declarations(&config.declaration_tool)
        } else {
            bundler
        }
    }

    async fn bundle_module(&self, entry: &Path, format: &str, outfile: &Path) -> Result<(), BundleError> {
        let mut outfile_arg = std::ffi::OsString::from("--outfile=");
        outfile_arg.push(outfile);

        let mut cmd = Command::new(&self.program);
        cmd.arg(entry)
            .arg("--bundle")
            .arg(format!("--format={format}"))
            .arg("--platform=node")
            .arg(outfile_arg);
        run(&self.program, cmd).await
    }

    async fn declarations(&self, tool: &str, entry: &Path, dist_dir: &Path) -> Result<PathBuf, BundleError> {
        let mut cmd = Command::new(tool);
        cmd.arg(entry)
            .arg("--declaration")
            .arg("--emitDeclarationOnly")
            .arg("--outDir")
            .arg(dist_dir);
        run(tool, cmd).await?;

        let stem = entry.file_stem().unwrap_or_default();
        Ok(dist_dir.join(Path::new(stem).with_extension("d.ts")))
    }
}

#[async_trait]
impl Bundler for CommandBundler {
    async fn bundle(&self, document: &EmittedDocument, dist_dir: &Path) -> Result<BundleOutput, BundleError> {
        tokio::fs::create_dir_all(dist_dir)
            .await
            .map_err(|source| BundleError::Io {
                path: dist_dir.to_path_buf(),
                source,
            })?;

        let esm = dist_dir.join("index.js");
        let cjs = dist_dir.join("index.cjs");
        self.bundle_module(&document.path, "esm", &esm).await?;
        self.bundle_module(&document.path, "cjs", &cjs).await?;

        // Missing declarations never fail the build
        let declarations = match &self.declaration_tool {
            Some(tool) => match self.declarations(tool, &document.path, dist_dir).await {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!(format = %document.kind, error = %e, "declaration generation failed");
                    None
                }
            },
            None => None,
        };

        info!(format = %document.kind, dist = %dist_dir.display(), "bundled");
        Ok(BundleOutput {
            dist_dir: dist_dir.to_path_buf(),
            esm,
            cjs,
            declarations,
        })
    }
}

async fn run(program: &str, mut cmd: Command) -> Result<(), BundleError> {
    debug!(program, ?cmd, "running");
    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| BundleError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if output.status.success() {
        return Ok(());
    }

    let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.len() > MAX_STDERR {
        let mut cut = MAX_STDERR;
        while !stderr.is_char_boundary(cut) {
            cut -= 1;
        }
        stderr.truncate(cut);
    }

    Err(BundleError::Failed {
        program: program.to_string(),
        code: output.status.code(),
        stderr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_palette::FormatKind;

    fn document(path: PathBuf) -> EmittedDocument {
        EmittedDocument {
            kind: FormatKind::Strings,
            path,
            bytes: 0,
            constants: 0,
        }
    }

    #[test]
    fn test_from_config() {
        let config = BundleConfig::default();
        let bundler = CommandBundler::from_config(&config);
        assert_eq!(bundler.program, "esbuild");
        assert_eq!(bundler.declaration_tool.as_deref(), Some("tsc"));

        let config = BundleConfig {
            declarations: false,
            ..Default::default()
        };
        assert!(CommandBundler::from_config(&config).declaration_tool.is_none());
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let bundler = CommandBundler::new("chroma-no-such-bundler-binary");

        let err = bundler
            .bundle(&document(dir.path().join("colors.ts")), &dir.path().join("dist"))
            .await
            .unwrap_err();

        assert!(matches!(err, BundleError::Spawn { .. }), "{err}");
        assert!(dir.path().join("dist").is_dir());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_declarations_are_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // `true` accepts any arguments and succeeds; `false` always fails
        let bundler = CommandBundler::new("true").with_declarations("false");

        let output = bundler
            .bundle(&document(dir.path().join("colors.ts")), &dir.path().join("dist"))
            .await
            .unwrap();

        assert_eq!(output.esm, dir.path().join("dist/index.js"));
        assert_eq!(output.cjs, dir.path().join("dist/index.cjs"));
        assert!(output.declarations.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_bundler_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let bundler = CommandBundler::new("false");

        let err = bundler
            .bundle(&document(dir.path().join("colors.ts")), &dir.path().join("dist"))
            .await
            .unwrap_err();

        assert!(matches!(err, BundleError::Failed { code: Some(1), .. }), "{err}");
    }
}
