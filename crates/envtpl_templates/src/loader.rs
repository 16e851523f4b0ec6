//! Template lookup inside the template directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{TemplateError, TemplateResult};

/// Resolves logical template names to files under a template directory.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    templates_path: PathBuf,
}

impl TemplateLoader {
    /// Create a new template loader.
    pub fn new(templates_path: impl Into<PathBuf>) -> Self {
        Self {
            templates_path: templates_path.into(),
        }
    }

    pub fn templates_path(&self) -> &Path {
        &self.templates_path
    }

    /// Resolve a template name to an existing file.
    ///
    /// Names are relative paths below the template directory. Absolute
    /// paths and names with `..` segments never resolve.
    pub fn resolve(&self, name: &str) -> TemplateResult<PathBuf> {
        let relative = Path::new(name);
        let contained = !name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if !contained {
            return Err(self.not_found(name));
        }

        let path = self.templates_path.join(relative);
        if !path.is_file() {
            return Err(self.not_found(name));
        }

        debug!("Resolved template {} to {:?}", name, path);
        Ok(path)
    }

    /// Read the source of a template by name.
    pub fn read(&self, name: &str) -> TemplateResult<String> {
        let path = self.resolve(name)?;
        Ok(fs::read_to_string(path)?)
    }

    fn not_found(&self, name: &str) -> TemplateError {
        TemplateError::NotFound {
            name: name.to_string(),
            dir: self.templates_path.clone(),
        }
    }
}
