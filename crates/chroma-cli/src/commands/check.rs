//! Check command implementation.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, Icons};

/// Scan the colors directory and report problems without writing
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Colors directory (overrides configuration)
    #[arg(long, value_name = "DIR")]
    pub colors_dir: Option<PathBuf>,

    /// Fail when the scan produced any warning
    #[arg(long)]
    pub strict: bool,
}

impl CheckCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let report = super::scan(&ctx.config, self.colors_dir.as_ref()).await?;

        let output = CheckOutput {
            root: self
                .colors_dir
                .clone()
                .unwrap_or_else(|| ctx.config.colors_dir.clone()),
            files: report.files_seen,
            colors: report.table.len(),
            categories: report.table.category_count(),
            skipped: report.files_skipped(),
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
        };
        print_output(ctx, &output)?;

        if self.strict && !output.warnings.is_empty() {
            return Err(CliError::validation(format!(
                "{} warnings found in strict mode",
                output.warnings.len()
            )));
        }
        Ok(())
    }
}

/// Scan summary
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub root: PathBuf,
    pub files: usize,
    pub colors: usize,
    pub categories: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
}

impl FormattedOutput for CheckOutput {
    fn format_text(&self) -> String {
        let mut lines: Vec<String> = self
            .warnings
            .iter()
            .map(|w| format!("{} {w}", Icons::WARNING))
            .collect();

        let icon = if self.warnings.is_empty() {
            Icons::CHECK
        } else {
            Icons::WARNING
        };
        lines.push(format!(
            "{icon} {}: {} files, {} colors in {} categories, {} skipped, {} warnings",
            self.root.display(),
            self.files,
            self.colors,
            self.categories,
            self.skipped,
            self.warnings.len()
        ));
        lines.join("\n")
    }
}
