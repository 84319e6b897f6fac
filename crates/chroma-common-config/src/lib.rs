//! Configuration types for Chroma.
//!
//! This crate provides the configuration used by the `chroma` color
//! compiler, read from a `chroma.yaml` file in the project directory.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
