//! Template rendering by name.

use tracing::debug;

use crate::context::RenderContext;
use crate::engine::TemplateEngine;
use crate::error::TemplateResult;

/// Renders named templates through a [`TemplateEngine`].
pub struct TemplateRenderer<E> {
    engine: E,
}

impl<E: TemplateEngine> TemplateRenderer<E> {
    /// Create a new template renderer.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Resolve `name`, apply `context` and return the complete text.
    pub fn render(&self, name: &str, context: &RenderContext) -> TemplateResult<String> {
        let template = self.engine.resolve(name)?;
        debug!(
            "Rendering template {} from {:?} with {} variable(s)",
            template.name(),
            template.path(),
            context.len()
        );

        self.engine.render(&template, context)
    }
}
