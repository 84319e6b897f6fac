//! List command implementation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chroma_palette::{Bucket, ColorTable};
use clap::Parser;
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Print the color table
#[derive(Debug, Parser)]
pub struct ListCommand {
    /// Colors directory (overrides configuration)
    #[arg(long, value_name = "DIR")]
    pub colors_dir: Option<PathBuf>,

    /// Only show this category
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,
}

impl ListCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let report = super::scan(&ctx.config, self.colors_dir.as_ref()).await?;
        let output = self.select(&report.table)?;
        print_output(ctx, &output)
    }

    fn select(&self, table: &ColorTable) -> Result<ListOutput, CliError> {
        match &self.category {
            Some(name) => {
                let bucket = table.category(name).ok_or_else(|| {
                    let suggestions = table
                        .categories()
                        .map(|(category, _)| category)
                        .filter(|category| similar(category, name))
                        .map(str::to_string)
                        .collect();
                    CliError::not_found_with_suggestions("category", name.as_str(), suggestions)
                })?;
                Ok(ListOutput(BTreeMap::from([(name.clone(), hex_values(bucket))])))
            }
            None => Ok(ListOutput(
                table
                    .categories()
                    .map(|(category, bucket)| (category.to_string(), hex_values(bucket)))
                    .collect(),
            )),
        }
    }
}

fn hex_values(bucket: &Bucket) -> BTreeMap<String, String> {
    bucket
        .iter()
        .map(|(name, entry)| (name.clone(), entry.value().to_hex_string()))
        .collect()
}

/// Loose match for "did you mean" suggestions.
fn similar(candidate: &str, wanted: &str) -> bool {
    let candidate = candidate.to_lowercase();
    let wanted = wanted.to_lowercase();
    if candidate.contains(&wanted) || wanted.contains(&candidate) {
        return true;
    }
    let mut a: Vec<char> = candidate.chars().collect();
    let mut b: Vec<char> = wanted.chars().collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

/// Category -> color name -> `#rrggbb`
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ListOutput(BTreeMap<String, BTreeMap<String, String>>);

impl FormattedOutput for ListOutput {
    fn format_text(&self) -> String {
        if self.0.is_empty() {
            return "No colors found".to_string();
        }

        let width = self
            .0
            .values()
            .flat_map(|colors| colors.keys())
            .map(String::len)
            .max()
            .unwrap_or(0);

        let mut lines = Vec::new();
        for (category, colors) in &self.0 {
            lines.push(category.clone());
            for (name, hex) in colors {
                lines.push(format!("  {name:<width$}  {hex}"));
            }
        }
        lines.join("\n")
    }
}
