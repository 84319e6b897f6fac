//! Chroma common core types and utilities.

pub mod error;
pub mod types;

pub use error::{Error, FsErrorKind, Result};
pub use types::*;
