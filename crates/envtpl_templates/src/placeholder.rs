//! Plain placeholder substitution.

use std::path::PathBuf;

use regex::{Captures, Regex};
use serde_yaml::Value;
use tracing::debug;

use crate::context::RenderContext;
use crate::engine::{ResolvedTemplate, TemplateEngine};
use crate::error::{TemplateError, TemplateResult};
use crate::loader::TemplateLoader;

/// Template engine that only replaces `{{ key.path }}` placeholders.
///
/// There is no control flow and no filters. Unresolved placeholders are left
/// in place, unless the engine is strict.
pub struct PlaceholderEngine {
    loader: TemplateLoader,
    variable_pattern: Regex,
    strict: bool,
}

impl PlaceholderEngine {
    /// Create an engine that loads templates from `templates_dir`.
    pub fn new(templates_dir: impl Into<PathBuf>) -> TemplateResult<Self> {
        Ok(Self {
            loader: TemplateLoader::new(templates_dir),
            // Match {{ name }} and {{ name.nested.0 }}
            variable_pattern: Regex::new(
                r"\{\{\s*([A-Za-z_][A-Za-z0-9_-]*(?:\.[A-Za-z0-9_-]+)*)\s*\}\}",
            )?,
            strict: false,
        })
    }

    /// Make unresolved placeholders a render error.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Render content by replacing placeholders.
    pub fn render_content(
        &self,
        name: &str,
        content: &str,
        context: &RenderContext,
    ) -> TemplateResult<String> {
        let mut missing: Option<String> = None;

        let rendered = self
            .variable_pattern
            .replace_all(content, |caps: &Captures| {
                let path = &caps[1];
                match context.lookup(path) {
                    Some(value) => display_value(value),
                    None => {
                        if missing.is_none() {
                            missing = Some(path.to_string());
                        }
                        caps[0].to_string()
                    }
                }
            })
            .into_owned();

        if let Some(variable) = missing {
            if self.strict {
                return Err(TemplateError::UndefinedVariable {
                    name: name.to_string(),
                    variable,
                });
            }
            debug!("Left unresolved placeholder {} in {}", variable, name);
        }

        Ok(rendered)
    }
}

impl TemplateEngine for PlaceholderEngine {
    fn resolve(&self, name: &str) -> TemplateResult<ResolvedTemplate> {
        let path = self.loader.resolve(name)?;
        Ok(ResolvedTemplate::new(name, path))
    }

    fn render(&self, template: &ResolvedTemplate, context: &RenderContext) -> TemplateResult<String> {
        let content = self.loader.read(template.name())?;
        self.render_content(template.name(), &content, context)
    }

    fn supports_control_flow(&self) -> bool {
        false
    }

    fn supports_filters(&self) -> bool {
        false
    }
}

/// Text form of a value: scalars as written, collections as YAML.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => display_value(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
