//! Error types for templates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during template operations.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template {name} not found in {}", .dir.display())]
    NotFound { name: String, dir: PathBuf },

    #[error("Template {name} failed to render: {message}")]
    RenderingFailed { name: String, message: String },

    #[error("Undefined variable {variable} in template {name}")]
    UndefinedVariable { name: String, variable: String },

    #[error("Invalid placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TemplateError {
    /// Convert a MiniJinja error raised while loading or rendering `name`.
    pub(crate) fn from_minijinja(name: &str, dir: &std::path::Path, err: minijinja::Error) -> Self {
        match err.kind() {
            minijinja::ErrorKind::TemplateNotFound => Self::NotFound {
                name: name.to_string(),
                dir: dir.to_path_buf(),
            },
            _ => Self::RenderingFailed {
                name: name.to_string(),
                message: err.to_string(),
            },
        }
    }

    /// Whether this error means the template could not be located.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
