//! # envtpl_core
//!
//! The render pipeline for envtpl.
//!
//! A run is strictly linear:
//!
//! 1. [`EnvironmentRegistry`] loads the configuration document and selects
//!    one environment's data.
//! 2. [`TemplateRenderer`](envtpl_templates::TemplateRenderer) substitutes
//!    that data into a named template.
//! 3. [`OutputSink`] prints the result (dry-run) or writes it to
//!    `<outdir>/deployment-<env>.yaml`.
//!
//! Every failure is a [`CoreError`] with a fixed process exit code, see
//! [`CoreError::exit_code`].

pub mod error;
pub mod pipeline;
pub mod registry;
pub mod settings;
pub mod sink;

pub use error::{CoreError, CoreResult, ExitCodes};
pub use pipeline::{Pipeline, PipelineStage, RenderRequest};
pub use registry::{load_environment, EnvironmentRegistry};
pub use settings::PipelineSettings;
pub use sink::{output_path, Emitted, OutputMode, OutputSink};

pub use envtpl_templates::RenderContext;
