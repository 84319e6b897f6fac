//! Generated module rendering.
//!
//! Every format produces the same document shape: a header comment, one
//! `export const` per color, and an `export default` object holding the
//! category table. Only the value tokens differ, and each format supplies
//! those through its own [`ValueSerializer`].

use std::path::{Path, PathBuf};

use chroma_common_core::FormatKind;
use thiserror::Error;
use tracing::{debug, info};

use crate::color::Rgb;
use crate::table::ColorTable;

/// First line of every generated document.
pub const GENERATED_HEADER: &str = "// Generated by chroma. Do not edit by hand.";

const INDENT: &str = "  ";

/// Renders a color as a value token of one output format.
pub trait ValueSerializer: Send + Sync {
    /// Format this serializer produces.
    fn kind(&self) -> FormatKind;

    /// The literal token for `value`.
    fn token(&self, value: Rgb) -> String;
}

/// `"#dc143c"`
#[derive(Debug, Clone, Copy)]
pub struct QuotedHex;

impl ValueSerializer for QuotedHex {
    fn kind(&self) -> FormatKind {
        FormatKind::Strings
    }

    fn token(&self, value: Rgb) -> String {
        format!("\"{value}\"")
    }
}

/// `14423100`
#[derive(Debug, Clone, Copy)]
pub struct Decimal;

impl ValueSerializer for Decimal {
    fn kind(&self) -> FormatKind {
        FormatKind::Numbers
    }

    fn token(&self, value: Rgb) -> String {
        value.value().to_string()
    }
}

/// `0xdc143c`
#[derive(Debug, Clone, Copy)]
pub struct HexLiteral;

impl ValueSerializer for HexLiteral {
    fn kind(&self) -> FormatKind {
        FormatKind::Hex
    }

    fn token(&self, value: Rgb) -> String {
        format!("0x{value:06x}")
    }
}

/// Serializer for `kind`.
pub fn serializer_for(kind: FormatKind) -> &'static dyn ValueSerializer {
    match kind {
        FormatKind::Strings => &QuotedHex,
        FormatKind::Numbers => &Decimal,
        FormatKind::Hex => &HexLiteral,
    }
}

/// Render the full document for `kind`.
///
/// Output depends only on the table contents, so the same table always
/// renders to the same bytes.
pub fn render(table: &ColorTable, kind: FormatKind) -> String {
    let serializer = serializer_for(kind);
    let mut out = String::new();

    out.push_str(GENERATED_HEADER);
    out.push('\n');

    for entry in table.colors() {
        out.push_str("export const ");
        out.push_str(entry.name());
        out.push_str(" = ");
        out.push_str(&serializer.token(entry.value()));
        out.push_str(";\n");
    }

    out.push('\n');
    out.push_str("export default {");

    if table.category_count() == 0 {
        out.push_str("};\n");
        return out;
    }

    out.push('\n');
    let mut categories = table.categories().peekable();
    while let Some((category, bucket)) = categories.next() {
        push_key(&mut out, 1, category);
        out.push_str("{\n");

        let mut members = bucket.iter().peekable();
        while let Some((name, entry)) = members.next() {
            push_key(&mut out, 2, name);
            out.push_str(&serializer.token(entry.value()));
            if members.peek().is_some() {
                out.push(',');
            }
            out.push('\n');
        }

        out.push_str(INDENT);
        out.push('}');
        if categories.peek().is_some() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("};\n");
    out
}

fn push_key(out: &mut String, depth: usize, key: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    // Identifiers never need escaping, but keys are JSON strings regardless
    out.push_str(&serde_json::Value::from(key).to_string());
    out.push_str(": ");
}

/// A format paired with the file its document goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub kind: FormatKind,
    pub output: PathBuf,
}

impl FormatDescriptor {
    pub fn new(kind: FormatKind, output: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            output: output.into(),
        }
    }
}

/// Summary of one written document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedDocument {
    pub kind: FormatKind,
    pub path: PathBuf,
    /// Size of the document in bytes.
    pub bytes: usize,
    /// Number of `export const` declarations.
    pub constants: usize,
}

/// A document could not be written.
#[derive(Debug, Error)]
#[error("failed to write {kind} colors to {}: {source}", path.display())]
pub struct EmitError {
    pub kind: FormatKind,
    pub path: PathBuf,
    #[source]
    pub source: chroma_common_core::Error,
}

impl EmitError {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Render `table` for `descriptor` and write it, replacing any existing file.
pub fn emit(table: &ColorTable, descriptor: &FormatDescriptor) -> Result<EmittedDocument, EmitError> {
    let document = render(table, descriptor.kind);
    debug!(
        format = %descriptor.kind,
        path = %descriptor.output.display(),
        bytes = document.len(),
        "rendered document"
    );

    chroma_common_fs::write_string_atomic(&descriptor.output, &document).map_err(|source| {
        EmitError {
            kind: descriptor.kind,
            path: descriptor.output.clone(),
            source,
        }
    })?;

    info!(
        format = %descriptor.kind,
        path = %descriptor.output.display(),
        colors = table.len(),
        "wrote colors"
    );

    Ok(EmittedDocument {
        kind: descriptor.kind,
        path: descriptor.output.clone(),
        bytes: document.len(),
        constants: table.len(),
    })
}
