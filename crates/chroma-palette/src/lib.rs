//! Chroma palette compiler.
//!
//! This crate turns a directory of color definition files into generated
//! source modules. The [`Scanner`] walks the colors root and builds a
//! [`ColorTable`]; the emitter renders that table once per [`FormatKind`]
//! and writes each document to its own path. [`Pipeline`] ties the two
//! together for a full build.
//!
//! ```no_run
//! use chroma_palette::{FormatDescriptor, FormatKind, Pipeline};
//!
//! let pipeline = Pipeline::new(
//!     "colors",
//!     vec![FormatDescriptor::new(FormatKind::Strings, "builds/colors-strings.ts")],
//! );
//! let report = pipeline.run();
//! assert!(report.is_success());
//! ```

pub mod color;
pub mod emitter;
pub mod entry;
pub mod pipeline;
pub mod scanner;
pub mod table;

pub use chroma_common_core::FormatKind;
pub use color::{is_identifier, Rgb};
pub use emitter::{emit, render, serializer_for, EmitError, EmittedDocument, FormatDescriptor, ValueSerializer};
pub use entry::{ColorEntry, ColorFileError, ParsedColor};
pub use pipeline::{BuildReport, Pipeline};
pub use scanner::{ScanOptions, ScanReport, ScanWarning, Scanner};
pub use table::{Bucket, ColorTable};
