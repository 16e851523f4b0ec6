//! Error types for the core module.

use std::path::PathBuf;

use envtpl_templates::TemplateError;
use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Process exit codes, one per failure class.
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const CONFIG_NOT_FOUND: u8 = 1;
    pub const ENVIRONMENT_NOT_FOUND: u8 = 2;
    pub const TEMPLATE_NOT_FOUND: u8 = 3;
    pub const OUTPUT_WRITE_ERROR: u8 = 4;
    pub const CONFIG_PARSE_ERROR: u8 = 5;
    pub const TEMPLATE_ERROR: u8 = 6;
    pub const GENERAL_ERROR: u8 = 10;
}

/// Errors that can occur during a render run.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Config file {} not found.", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Config file {} is invalid: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error(
        "Environment '{name}' not found in {}. Available envs: {}",
        .path.display(),
        available_list(.available)
    )]
    EnvironmentNotFound {
        name: String,
        path: PathBuf,
        available: Vec<String>,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// The exit code a process should terminate with for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigNotFound(_) => ExitCodes::CONFIG_NOT_FOUND,
            Self::EnvironmentNotFound { .. } => ExitCodes::ENVIRONMENT_NOT_FOUND,
            Self::Template(TemplateError::NotFound { .. }) => ExitCodes::TEMPLATE_NOT_FOUND,
            Self::Template(_) => ExitCodes::TEMPLATE_ERROR,
            Self::OutputWrite { .. } => ExitCodes::OUTPUT_WRITE_ERROR,
            Self::ConfigParse { .. } => ExitCodes::CONFIG_PARSE_ERROR,
            Self::Io(_) => ExitCodes::GENERAL_ERROR,
        }
    }
}

fn available_list(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
