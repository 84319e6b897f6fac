//! Full builds: one scan, then one emission per format.

use std::path::{Path, PathBuf};

use chroma_common_config::ChromaConfig;
use chroma_common_log::spans::{format_span, stage_span, Timer};
use tracing::{error, info};

use crate::emitter::{emit, EmitError, EmittedDocument, FormatDescriptor};
use crate::scanner::{ScanOptions, ScanReport, Scanner};
use crate::table::ColorTable;

/// Outcome of [`Pipeline::run`].
#[derive(Debug)]
pub struct BuildReport {
    pub scan: ScanReport,
    /// One result per configured format, in configured order.
    pub outputs: Vec<Result<EmittedDocument, EmitError>>,
}

impl BuildReport {
    /// Whether every format was written.
    pub fn is_success(&self) -> bool {
        self.outputs.iter().all(Result::is_ok)
    }

    pub fn documents(&self) -> impl Iterator<Item = &EmittedDocument> {
        self.outputs.iter().filter_map(|r| r.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &EmitError> {
        self.outputs.iter().filter_map(|r| r.as_ref().err())
    }
}

/// A configured build.
#[derive(Debug, Clone)]
pub struct Pipeline {
    colors_dir: PathBuf,
    formats: Vec<FormatDescriptor>,
    options: ScanOptions,
}

impl Pipeline {
    pub fn new(colors_dir: impl Into<PathBuf>, formats: Vec<FormatDescriptor>) -> Self {
        Self {
            colors_dir: colors_dir.into(),
            formats,
            options: ScanOptions::default(),
        }
    }

    /// Pipeline for every output listed in `config`.
    pub fn from_config(config: &ChromaConfig) -> Self {
        let formats = config
            .outputs
            .iter()
            .map(|output| FormatDescriptor::new(output.format, &output.path))
            .collect();
        Self::new(&config.colors_dir, formats).with_scan_options(ScanOptions::from(config))
    }

    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn colors_dir(&self) -> &Path {
        &self.colors_dir
    }

    pub fn formats(&self) -> &[FormatDescriptor] {
        &self.formats
    }

    /// Scan the colors directory.
    pub fn scan(&self) -> ScanReport {
        let _span = stage_span("scan").entered();
        Scanner::new(&self.colors_dir)
            .with_options(self.options.clone())
            .scan()
    }

    /// Write every format from an already scanned table.
    ///
    /// A failed format does not stop the others.
    pub fn emit_all(&self, table: &ColorTable) -> Vec<Result<EmittedDocument, EmitError>> {
        let _span = stage_span("emit").entered();
        self.formats
            .iter()
            .map(|descriptor| Self::emit_format(table, descriptor))
            .collect()
    }

    /// Write a single format, logging a failure before returning it.
    ///
    /// Callers that fan formats out over their own workers use this in
    /// place of [`Pipeline::emit_all`].
    pub fn emit_format(
        table: &ColorTable,
        descriptor: &FormatDescriptor,
    ) -> Result<EmittedDocument, EmitError> {
        let _span = format_span(descriptor.kind.name()).entered();
        let result = emit(table, descriptor);
        if let Err(e) = &result {
            error!(format = %e.kind, path = %e.path.display(), error = %e.source, "emit failed");
        }
        result
    }

    /// Scan once, then emit every format on the calling thread.
    pub fn run(&self) -> BuildReport {
        let timer = Timer::start("build");
        let scan = self.scan();
        let outputs = self.emit_all(&scan.table);
        let report = BuildReport { scan, outputs };

        let elapsed = timer.finish();
        info!(
            colors = report.scan.table.len(),
            warnings = report.scan.warnings.len(),
            written = report.documents().count(),
            failed = report.failures().count(),
            elapsed_ms = elapsed.as_millis() as u64,
            "build finished"
        );
        report
    }
}
