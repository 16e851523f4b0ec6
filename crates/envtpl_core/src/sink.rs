//! Output sink for rendered manifests.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{CoreError, CoreResult};

/// Where rendered text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Print to standard output, touch no files.
    DryRun,
    /// Write `deployment-<env>.yaml` into `outdir`.
    Write { outdir: PathBuf },
}

/// What an emit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Printed,
    Written(PathBuf),
}

/// Path of the manifest file for an environment.
pub fn output_path(outdir: &Path, env_name: &str) -> PathBuf {
    outdir.join(format!("deployment-{}.yaml", env_name))
}

/// Emits rendered text according to an [`OutputMode`].
///
/// `W` receives dry-run output; it is the process's stdout outside tests.
pub struct OutputSink<W: Write> {
    mode: OutputMode,
    stdout: W,
}

impl OutputSink<io::Stdout> {
    pub fn stdout(mode: OutputMode) -> Self {
        Self::new(mode, io::stdout())
    }
}

impl<W: Write> OutputSink<W> {
    pub fn new(mode: OutputMode, stdout: W) -> Self {
        Self { mode, stdout }
    }

    pub fn into_inner(self) -> W {
        self.stdout
    }

    /// Emit `rendered` for `env_name`.
    ///
    /// In write mode the output directory is created with all missing
    /// parents and an existing file is overwritten.
    pub fn emit(&mut self, env_name: &str, rendered: &str) -> CoreResult<Emitted> {
        match &self.mode {
            OutputMode::DryRun => {
                info!("Dry run enabled. Rendering to stdout");
                writeln!(self.stdout, "{}", rendered)?;
                self.stdout.flush()?;
                Ok(Emitted::Printed)
            }
            OutputMode::Write { outdir } => {
                fs::create_dir_all(outdir).map_err(|source| CoreError::OutputWrite {
                    path: outdir.clone(),
                    source,
                })?;

                let path = output_path(outdir, env_name);
                fs::write(&path, rendered).map_err(|source| CoreError::OutputWrite {
                    path: path.clone(),
                    source,
                })?;

                info!("Wrote rendered manifest to {:?}", path);
                Ok(Emitted::Written(path))
            }
        }
    }
}
