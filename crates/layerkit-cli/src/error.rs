//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use layerkit_core::CoreError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Project descriptor or build output is missing or invalid
    #[error("Configuration error: {message}")]
    #[diagnostic(code(layerkit::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Archive entry tried to write outside the destination
    #[error("Blocked unsafe archive: {message}")]
    #[diagnostic(
        code(layerkit::cli::security),
        help("the archive was not fully extracted; do not trust its contents")
    )]
    Security { message: String },

    /// Archive could not be read
    #[error("Archive error: {message}")]
    #[diagnostic(code(layerkit::cli::archive))]
    Archive { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(layerkit::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(layerkit::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Security { .. } => exit_codes::SECURITY_ERROR,
            CliError::Archive { .. } => exit_codes::ARCHIVE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: None,
        }
    }

    /// Create a configuration error with help text
    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        if err.is_security_violation() {
            return CliError::Security { message };
        }
        match err {
            CoreError::Io(_) => CliError::Io { message },
            CoreError::ArchiveNotFound { .. } => CliError::config_with_help(
                message,
                "build the web archive first, or point webArchive in layerkit.yaml at it",
            ),
            CoreError::AmbiguousArchive { .. }
            | CoreError::InvalidProject { .. }
            | CoreError::YamlParse(_) => CliError::config(message),
            CoreError::Zip(_) | CoreError::UnsupportedArchive { .. } => {
                CliError::Archive { message }
            }
            _ => CliError::Internal { message },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("failed to serialize output: {}", err))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
