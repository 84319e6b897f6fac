//! Command implementations.

use std::path::PathBuf;

use chroma_common_config::ChromaConfig;
use chroma_palette::{ScanOptions, ScanReport, Scanner};

use crate::error::CliError;

mod build;
mod check;
mod list;

pub use build::BuildCommand;
pub use check::CheckCommand;
pub use list::ListCommand;

/// Scan the configured colors directory on a blocking task.
async fn scan(config: &ChromaConfig, colors_dir: Option<&PathBuf>) -> Result<ScanReport, CliError> {
    let root = colors_dir.unwrap_or(&config.colors_dir).clone();
    let options = ScanOptions::from(config);

    let report = tokio::task::spawn_blocking(move || Scanner::new(root).with_options(options).scan()).await?;
    Ok(report)
}
