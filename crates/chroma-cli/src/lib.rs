//! Chroma CLI Library
//!
//! Command line front end for the Chroma color asset compiler.

pub mod bundle;
pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;
