//! Configuration file loading and parsing.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::env::apply_overrides;
use crate::types::ChromaConfig;

/// Default configuration file name, looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "chroma.yaml";

static ENV_VAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("env var pattern is valid")
});

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
#[derive(Debug)]
pub struct ConfigLoader {
    base_path: PathBuf,
    file: PathBuf,
    required: bool,
}

impl ConfigLoader {
    /// Create a loader reading `chroma.yaml` from the given project directory.
    ///
    /// A missing file yields the defaults.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        let base_path = project_dir.as_ref().to_path_buf();
        Self {
            file: base_path.join(CONFIG_FILE_NAME),
            base_path,
            required: false,
        }
    }

    /// Create a loader for an explicit config file, which must exist.
    ///
    /// Relative paths inside it resolve against the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let file = path.as_ref().to_path_buf();
        let base_path = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self {
            base_path,
            file,
            required: true,
        }
    }

    /// Directory relative paths are resolved against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Load, expand, override from the environment, resolve and validate.
    pub fn load(&self) -> Result<ChromaConfig, ConfigError> {
        let mut config = if self.file.exists() {
            let contents = std::fs::read_to_string(&self.file)?;
            let expanded = self.expand_env_vars(&contents)?;
            Self::parse(&expanded)?
        } else if self.required {
            return Err(ConfigError::NotFound {
                path: self.file.clone(),
            });
        } else {
            ChromaConfig::default()
        };

        apply_overrides(&mut config);
        config.resolve_paths(&self.base_path);
        self.validate(&config)?;
        Ok(config)
    }

    fn parse(yaml: &str) -> Result<ChromaConfig, ConfigError> {
        // An empty file deserializes to unit, not to the defaults
        if yaml.trim().is_empty() {
            return Ok(ChromaConfig::default());
        }

        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut missing = None;

        let expanded = ENV_VAR_PATTERN.replace_all(content, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match (std::env::var(var_name), cap.get(2)) {
                (Ok(value), _) => value,
                (Err(_), Some(default)) => default.as_str().to_string(),
                (Err(_), None) => {
                    missing.get_or_insert_with(|| var_name.to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(var) => Err(ConfigError::EnvVarNotFound { var }),
            None => Ok(expanded.into_owned()),
        }
    }

    /// Validate configuration values.
    fn validate(&self, config: &ChromaConfig) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::ValidationError { message });

        if config.extension.is_empty() || config.extension.contains('.') {
            return invalid(format!(
                "extension must be non-empty and given without a dot, got '{}'",
                config.extension
            ));
        }

        if config.max_file_size == 0 {
            return invalid("max_file_size must be greater than 0".to_string());
        }

        if config.outputs.is_empty() {
            return invalid("at least one output must be configured".to_string());
        }

        let mut formats = HashSet::new();
        let mut paths = HashSet::new();
        for output in &config.outputs {
            if !formats.insert(output.format) {
                return invalid(format!("format '{}' is configured twice", output.format));
            }
            if !paths.insert(&output.path) {
                return invalid(format!(
                    "output path {} is used by more than one format",
                    output.path.display()
                ));
            }
        }

        if config.bundle.enabled && config.bundle.bundler.trim().is_empty() {
            return invalid("bundle.bundler must name an executable".to_string());
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}
