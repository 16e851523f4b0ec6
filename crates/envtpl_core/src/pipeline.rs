//! The load, render and emit pipeline.

use std::fmt;
use std::io::Write;

use envtpl_templates::{TemplateEngine, TemplateRenderer};
use tracing::debug;

use crate::error::CoreResult;
use crate::registry::EnvironmentRegistry;
use crate::settings::{PipelineSettings, DEFAULT_TEMPLATE};
use crate::sink::{Emitted, OutputSink};

/// Stages a run passes through. A failure ends the run at the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    ConfigLoaded,
    EnvironmentSelected,
    Rendered,
    PrintedToStdout,
    WrittenToFile,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::ConfigLoaded => "config-loaded",
            Self::EnvironmentSelected => "environment-selected",
            Self::Rendered => "rendered",
            Self::PrintedToStdout => "printed-to-stdout",
            Self::WrittenToFile => "written-to-file",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One environment rendered through one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub env: String,
    pub template: String,
}

impl RenderRequest {
    pub fn new(env: impl Into<String>) -> Self {
        Self {
            env: env.into(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }
}

/// Runs the render pipeline with a fixed set of paths and a template engine.
pub struct Pipeline<E> {
    settings: PipelineSettings,
    renderer: TemplateRenderer<E>,
}

impl<E: TemplateEngine> Pipeline<E> {
    pub fn new(settings: PipelineSettings, engine: E) -> Self {
        Self {
            settings,
            renderer: TemplateRenderer::new(engine),
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Load the configuration, select the environment and render the template.
    pub fn render(&self, request: &RenderRequest) -> CoreResult<String> {
        debug!("Stage: {}", PipelineStage::Start);

        let registry = EnvironmentRegistry::load(self.settings.config_path())?;
        debug!("Stage: {}", PipelineStage::ConfigLoaded);

        let context = registry.select(&request.env)?;
        debug!(
            "Stage: {} ({} with {} key(s))",
            PipelineStage::EnvironmentSelected,
            request.env,
            context.len()
        );

        let rendered = self.renderer.render(&request.template, &context)?;
        debug!(
            "Stage: {} ({} bytes)",
            PipelineStage::Rendered,
            rendered.len()
        );

        Ok(rendered)
    }

    /// Render and hand the result to `sink`.
    pub fn run<W: Write>(
        &self,
        request: &RenderRequest,
        sink: &mut OutputSink<W>,
    ) -> CoreResult<Emitted> {
        let rendered = self.render(request)?;
        let emitted = sink.emit(&request.env, &rendered)?;

        let stage = match emitted {
            Emitted::Printed => PipelineStage::PrintedToStdout,
            Emitted::Written(_) => PipelineStage::WrittenToFile,
        };
        debug!("Stage: {}", stage);

        Ok(emitted)
    }
}
