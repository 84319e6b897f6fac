//! Environment variable handling.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ChromaConfig;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    /// Explicit config file path.
    pub const CHROMA_CONFIG: &str = "CHROMA_CONFIG";
    /// Overrides `colors_dir`.
    pub const CHROMA_COLORS_DIR: &str = "CHROMA_COLORS_DIR";
    /// Moves every generated document into this directory.
    pub const CHROMA_OUT_DIR: &str = "CHROMA_OUT_DIR";
    /// Overrides `bundle.dist_dir`.
    pub const CHROMA_DIST_DIR: &str = "CHROMA_DIST_DIR";
}

/// Environment configuration.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Initialize environment from `.env` files in the working directory.
    ///
    /// Missing files are fine; later files override earlier ones.
    pub fn init() -> Result<Self, EnvError> {
        for file in [".env", ".env.local"] {
            match dotenvy::from_filename(file) {
                Ok(_) => {}
                Err(e) if e.not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Self { _guard: () })
    }

    /// Get an optional, non-empty string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.is_empty())
    }
}

/// Apply `CHROMA_*` directory overrides from the process environment.
pub fn apply_overrides(config: &mut ChromaConfig) {
    apply_overrides_from(config, Environment::get);
}

/// Apply directory overrides using `lookup` to read variables.
pub fn apply_overrides_from(config: &mut ChromaConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(dir) = lookup(vars::CHROMA_COLORS_DIR) {
        config.colors_dir = PathBuf::from(dir);
    }
    if let Some(dir) = lookup(vars::CHROMA_OUT_DIR) {
        config.relocate_outputs(&PathBuf::from(dir));
    }
    if let Some(dir) = lookup(vars::CHROMA_DIST_DIR) {
        config.bundle.dist_dir = PathBuf::from(dir);
    }
}
