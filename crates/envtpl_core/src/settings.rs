//! Paths a render run works with.

use std::path::{Path, PathBuf};

/// Default configuration document, relative to the base directory.
pub const DEFAULT_CONFIG_FILE: &str = "envs.yaml";
/// Default template directory, relative to the base directory.
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
/// Default template name.
pub const DEFAULT_TEMPLATE: &str = "deployment.yaml.j2";
/// Default output directory, relative to the base directory.
pub const DEFAULT_OUTDIR: &str = "build";

/// Locations of the configuration document, templates and output.
///
/// Relative paths are anchored at `base_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    base_dir: PathBuf,
    config_path: PathBuf,
    templates_dir: PathBuf,
}

impl PipelineSettings {
    /// Settings with the default layout under `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            config_path: base_dir.join(DEFAULT_CONFIG_FILE),
            templates_dir: base_dir.join(DEFAULT_TEMPLATES_DIR),
            base_dir,
        }
    }

    pub fn with_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = self.resolve(path);
        self
    }

    pub fn with_templates_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.templates_dir = self.resolve(path);
        self
    }

    /// Anchor a path at the base directory unless it is already absolute.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }
}
