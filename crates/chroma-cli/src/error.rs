//! CLI error handling.

use std::io;
use std::process::ExitCode;

use serde::Serialize;
use thiserror::Error;

use crate::cli::OutputFormat;

/// CLI error type with rich context
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },

    /// One or more formats could not be written or bundled.
    #[error("{message}")]
    Build { message: String, failures: Vec<String> },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
            Self::Build { .. } => "E006",
            Self::Other(_) => "E999",
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        let code = match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Validation { .. } => 5,
            Self::Build { .. } => 6,
            Self::NotFound { .. } | Self::Other(_) => 1,
        };
        ExitCode::from(code)
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::NotFound { suggestions, .. } if !suggestions.is_empty() => {
                Some("See suggestions below")
            }
            _ => None,
        }
    }

    /// Lines printed under the main message.
    pub fn details(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            Self::Build { failures, .. } => failures,
            _ => &[],
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    /// Create a build error listing each failure.
    pub fn build(message: impl Into<String>, failures: Vec<String>) -> Self {
        Self::Build {
            message: message.into(),
            failures,
        }
    }

    /// Print the error to stderr in the selected format.
    pub fn report(&self, format: OutputFormat) {
        match format {
            OutputFormat::Json => {
                let body = ErrorBody {
                    code: self.code(),
                    message: self.to_string(),
                    hint: self.hint(),
                    details: self.details(),
                };
                match serde_json::to_string_pretty(&body) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("error[{}]: {self}", self.code()),
                }
            }
            OutputFormat::Text => {
                eprintln!("error[{}]: {self}", self.code());
                for detail in self.details() {
                    eprintln!("  - {detail}");
                }
                if let Some(hint) = self.hint() {
                    eprintln!("hint: {hint}");
                }
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'a str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    details: &'a [String],
}

// Conversion implementations
impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<chroma_common_config::ConfigError> for CliError {
    fn from(err: chroma_common_config::ConfigError) -> Self {
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some(format!(
                "Check {} or the CHROMA_* environment variables",
                chroma_common_config::CONFIG_FILE_NAME
            )),
        }
    }
}

impl From<chroma_common_config::EnvError> for CliError {
    fn from(err: chroma_common_config::EnvError) -> Self {
        Self::Config {
            message: format!("Failed to load .env file: {err}"),
            source: Some(Box::new(err)),
            hint: None,
        }
    }
}

impl From<tokio::task::JoinError> for CliError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Other(anyhow::anyhow!("background task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let config: CliError = chroma_common_config::ConfigError::ValidationError {
            message: "x".to_string(),
        }
        .into();
        assert_eq!(config.exit_code(), ExitCode::from(2));
        assert_eq!(
            CliError::from(io::Error::new(io::ErrorKind::Other, "x")).exit_code(),
            ExitCode::from(3)
        );
        assert_eq!(CliError::validation("x").exit_code(), ExitCode::from(5));
        assert_eq!(CliError::build("x", vec![]).exit_code(), ExitCode::from(6));
    }

    #[test]
    fn test_config_error_conversion_keeps_hint() {
        let err: CliError = chroma_common_config::ConfigError::ValidationError {
            message: "outputs must not be empty".to_string(),
        }
        .into();

        assert_eq!(err.code(), "E001");
        assert!(err.to_string().contains("outputs must not be empty"));
        assert!(err.hint().is_some_and(|h| h.contains("chroma.yaml")));
    }

    #[test]
    fn test_build_error_details() {
        let err = CliError::build("1 format failed", vec!["hex: disk full".to_string()]);
        assert_eq!(err.details(), ["hex: disk full".to_string()]);
        assert!(err.hint().is_none());
    }

    #[test]
    fn test_not_found_suggestions() {
        let err = CliError::not_found_with_suggestions("category", "wram", vec!["warm".to_string()]);
        assert_eq!(err.to_string(), "category not found: wram");
        assert_eq!(err.details(), ["warm".to_string()]);
        assert_eq!(err.hint(), Some("See suggestions below"));
    }
}
