//! Build command implementation.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use chroma_common_config::ChromaConfig;
use chroma_common_log::spans::stage_span;
use chroma_palette::{EmitError, EmittedDocument, FormatKind, Pipeline};
use clap::Parser;
use serde::Serialize;
use tracing::Instrument;

use crate::bundle::{BundleOutput, Bundler, CommandBundler};
use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::progress::Spinner;
use crate::output::{print_output, FormattedOutput, Icons};

/// Scan the colors directory and write every generated module
#[derive(Debug, Parser)]
pub struct BuildCommand {
    /// Colors directory (overrides configuration)
    #[arg(long, value_name = "DIR")]
    pub colors_dir: Option<PathBuf>,

    /// Write every generated module into this directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Only build these formats (strings, numbers, hex)
    #[arg(long, value_name = "KIND", value_delimiter = ',')]
    pub only: Vec<FormatKind>,

    /// Run the external bundler after writing
    #[arg(long)]
    pub bundle: bool,
}

impl BuildCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let config = self.apply(ctx.config.clone())?;
        let pipeline = Arc::new(Pipeline::from_config(&config));

        let spinner = Spinner::new("Building colors...")
            .enabled(ctx.interactive())
            .start();

        let scan = {
            let pipeline = pipeline.clone();
            tokio::task::spawn_blocking(move || pipeline.scan()).await?
        };
        let table = Arc::new(scan.table);

        // One blocking task per format; outputs never share a path
        let handles: Vec<_> = pipeline
            .formats()
            .iter()
            .cloned()
            .map(|descriptor| {
                let table = table.clone();
                tokio::task::spawn_blocking(move || Pipeline::emit_format(&table, &descriptor))
            })
            .collect();

        let mut emitted = Vec::with_capacity(handles.len());
        for handle in handles {
            emitted.push(handle.await?);
        }

        let mut report = BuildOutput {
            colors: table.len(),
            categories: table.category_count(),
            warnings: scan.warnings.iter().map(ToString::to_string).collect(),
            outputs: Vec::new(),
            failures: Vec::new(),
        };

        let bundler = config
            .bundle
            .enabled
            .then(|| CommandBundler::from_config(&config.bundle));

        for result in emitted {
            match result {
                Ok(document) => {
                    let bundle = match &bundler {
                        Some(bundler) => match run_bundler(bundler, &document, &config).await {
                            Ok(output) => Some(output),
                            Err(failure) => {
                                report.failures.push(failure);
                                None
                            }
                        },
                        None => None,
                    };
                    report.outputs.push(OutputEntry::new(document, bundle));
                }
                Err(e) => report.failures.push(FailureEntry::from(&e)),
            }
        }

        if report.failures.is_empty() {
            spinner.finish(&format!("Built {} colors in {} formats", report.colors, report.outputs.len()));
            print_output(ctx, &report)?;
            Ok(())
        } else {
            spinner.fail("Build failed");
            print_output(ctx, &report)?;
            let failures = report.failures.iter().map(ToString::to_string).collect();
            Err(CliError::build(
                format!("{} of {} formats failed", report.failures.len(), pipeline.formats().len()),
                failures,
            ))
        }
    }

    /// Apply command line overrides on top of the loaded configuration.
    fn apply(&self, mut config: ChromaConfig) -> Result<ChromaConfig, CliError> {
        if let Some(dir) = &self.colors_dir {
            config.colors_dir = dir.clone();
        }
        if let Some(dir) = &self.out_dir {
            config.relocate_outputs(dir);
        }
        if self.bundle {
            config.bundle.enabled = true;
        }

        if !self.only.is_empty() {
            if let Some(missing) = self.only.iter().find(|kind| config.output_for(**kind).is_none()) {
                return Err(CliError::validation(format!("format '{missing}' has no configured output")));
            }
            config.outputs.retain(|output| self.only.contains(&output.format));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = config.outputs.iter().find(|o| !seen.insert(o.path.clone())) {
            return Err(CliError::validation(format!(
                "output path {} is used by more than one format",
                dup.path.display()
            )));
        }

        Ok(config)
    }
}

async fn run_bundler(
    bundler: &dyn Bundler,
    document: &EmittedDocument,
    config: &ChromaConfig,
) -> Result<BundleOutput, FailureEntry> {
    let dist_dir = config.bundle.dist_dir.join(document.kind.dist_subdir());
    let result = bundler
        .bundle(document, &dist_dir)
        .instrument(stage_span("bundle"))
        .await;
    result.map_err(|e| FailureEntry {
        format: document.kind,
        path: dist_dir,
        error: e.to_string(),
    })
}

/// Build summary
#[derive(Debug, Serialize)]
pub struct BuildOutput {
    pub colors: usize,
    pub categories: usize,
    pub warnings: Vec<String>,
    pub outputs: Vec<OutputEntry>,
    pub failures: Vec<FailureEntry>,
}

#[derive(Debug, Serialize)]
pub struct OutputEntry {
    pub format: FormatKind,
    pub path: PathBuf,
    pub bytes: usize,
    pub constants: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<BundleOutput>,
}

impl OutputEntry {
    fn new(document: EmittedDocument, bundle: Option<BundleOutput>) -> Self {
        Self {
            format: document.kind,
            path: document.path,
            bytes: document.bytes,
            constants: document.constants,
            bundle,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FailureEntry {
    pub format: FormatKind,
    pub path: PathBuf,
    pub error: String,
}

impl From<&EmitError> for FailureEntry {
    fn from(e: &EmitError) -> Self {
        Self {
            format: e.kind,
            path: e.path.clone(),
            error: e.source.to_string(),
        }
    }
}

impl std::fmt::Display for FailureEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.format, self.path.display(), self.error)
    }
}

impl FormattedOutput for BuildOutput {
    fn format_text(&self) -> String {
        let mut lines = Vec::new();
        for output in &self.outputs {
            lines.push(format!(
                "{} {:<8} {} {}",
                Icons::CHECK,
                output.format.name(),
                Icons::ARROW,
                output.path.display()
            ));
            if let Some(bundle) = &output.bundle {
                lines.push(format!("  {} {}", Icons::ARROW, bundle.dist_dir.display()));
            }
        }
        for failure in &self.failures {
            lines.push(format!("{} {failure}", Icons::CROSS));
        }
        lines.push(format!(
            "{} colors in {} categories, {} warnings",
            self.colors,
            self.categories,
            self.warnings.len()
        ));
        lines.join("\n")
    }
}
