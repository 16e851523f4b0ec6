//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait which lets the renderer
//! work with different substitution languages. The default implementation is
//! [`MiniJinjaEngine`], which understands Jinja2 syntax.

use std::path::{Path, PathBuf};

use minijinja::{path_loader, AutoEscape, Environment, UndefinedBehavior};
use tracing::debug;

use crate::context::RenderContext;
use crate::error::{TemplateError, TemplateResult};
use crate::loader::TemplateLoader;

/// Handle to a template that an engine has located and accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    name: String,
    path: PathBuf,
}

impl ResolvedTemplate {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Logical name the template was requested by.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the template was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A template engine that can locate templates by name and render them.
///
/// Rendering is all-or-nothing: an engine either returns the complete text
/// or an error, never partial output.
pub trait TemplateEngine {
    /// Locate a template by logical name.
    ///
    /// Fails with [`TemplateError::NotFound`] when the name does not resolve
    /// to a file in the engine's template directory.
    fn resolve(&self, name: &str) -> TemplateResult<ResolvedTemplate>;

    /// Render a resolved template with the given context.
    fn render(&self, template: &ResolvedTemplate, context: &RenderContext) -> TemplateResult<String>;

    /// Whether this engine supports control flow (`{% for %}`, `{% if %}`).
    fn supports_control_flow(&self) -> bool;

    /// Whether this engine supports filters (`{{ value | filter }}`).
    fn supports_filters(&self) -> bool;
}

impl<E: TemplateEngine + ?Sized> TemplateEngine for Box<E> {
    fn resolve(&self, name: &str) -> TemplateResult<ResolvedTemplate> {
        (**self).resolve(name)
    }

    fn render(&self, template: &ResolvedTemplate, context: &RenderContext) -> TemplateResult<String> {
        (**self).render(template, context)
    }

    fn supports_control_flow(&self) -> bool {
        (**self).supports_control_flow()
    }

    fn supports_filters(&self) -> bool {
        (**self).supports_filters()
    }
}

/// MiniJinja-based template engine.
///
/// Provides Jinja2-compatible rendering: variable access with dotted paths,
/// loops, conditionals and the builtin filters. Templates are loaded from the
/// template directory on first use and cached for the engine's lifetime.
///
/// Like Jinja2, output is not auto-escaped and a single trailing newline of
/// the template source is dropped.
pub struct MiniJinjaEngine {
    env: Environment<'static>,
    loader: TemplateLoader,
}

impl MiniJinjaEngine {
    /// Create an engine that loads templates from `templates_dir`.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        let loader = TemplateLoader::new(templates_dir);

        let mut env = Environment::new();
        env.set_loader(path_loader(loader.templates_path()));
        env.set_auto_escape_callback(|_name: &str| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Lenient);

        Self { env, loader }
    }

    /// Make undefined variables a render error instead of empty text.
    pub fn strict(mut self, strict: bool) -> Self {
        let behavior = if strict {
            UndefinedBehavior::Strict
        } else {
            UndefinedBehavior::Lenient
        };
        self.env.set_undefined_behavior(behavior);
        self
    }

    fn minijinja_error(&self, name: &str, err: minijinja::Error) -> TemplateError {
        TemplateError::from_minijinja(name, self.loader.templates_path(), err)
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn resolve(&self, name: &str) -> TemplateResult<ResolvedTemplate> {
        let path = self.loader.resolve(name)?;

        // Compile now so syntax errors surface before any rendering.
        self.env
            .get_template(name)
            .map_err(|e| self.minijinja_error(name, e))?;

        debug!("Compiled template {}", name);
        Ok(ResolvedTemplate::new(name, path))
    }

    fn render(&self, template: &ResolvedTemplate, context: &RenderContext) -> TemplateResult<String> {
        let tmpl = self
            .env
            .get_template(template.name())
            .map_err(|e| self.minijinja_error(template.name(), e))?;

        tmpl.render(context)
            .map_err(|e| self.minijinja_error(template.name(), e))
    }

    fn supports_control_flow(&self) -> bool {
        true
    }

    fn supports_filters(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn templates(files: &[(&str, &str)]) -> TempDir {
        let temp = tempdir().unwrap();
        for (name, source) in files {
            fs::write(temp.path().join(name), source).unwrap();
        }
        temp
    }

    fn context(yaml: &str) -> RenderContext {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn render(engine: &MiniJinjaEngine, name: &str, ctx: &RenderContext) -> TemplateResult<String> {
        let template = engine.resolve(name)?;
        engine.render(&template, ctx)
    }

    #[test]
    fn test_minijinja_engine_simple() {
        let dir = templates(&[("t.j2", "replicas: {{ replicas }}")]);
        let engine = MiniJinjaEngine::new(dir.path());

        let output = render(&engine, "t.j2", &context("name: svc-a\nreplicas: 2")).unwrap();
        assert_eq!(output, "replicas: 2");
    }

    #[test]
    fn test_minijinja_engine_loops_and_conditionals() {
        let source = "{% for port in ports %}- {{ port }}\n{% endfor %}{% if debug %}debug: on{% endif %}";
        let dir = templates(&[("t.j2", source)]);
        let engine = MiniJinjaEngine::new(dir.path());

        let output = render(&engine, "t.j2", &context("ports: [80, 443]\ndebug: true")).unwrap();
        assert_eq!(output, "- 80\n- 443\ndebug: on");
    }

    #[test]
    fn test_minijinja_engine_nested_values_and_filters() {
        let dir = templates(&[("t.yaml.j2", "image: {{ image.repo }}:{{ image.tag }}\nname: {{ name | upper }}")]);
        let engine = MiniJinjaEngine::new(dir.path());

        let ctx = context("name: web\nimage:\n  repo: nginx\n  tag: '1.25'");
        let output = render(&engine, "t.yaml.j2", &ctx).unwrap();
        assert_eq!(output, "image: nginx:1.25\nname: WEB");
    }

    #[test]
    fn test_minijinja_engine_does_not_escape() {
        let dir = templates(&[("page.html", "{{ value }}")]);
        let engine = MiniJinjaEngine::new(dir.path());

        let output = render(&engine, "page.html", &context("value: '<a & b>'")).unwrap();
        assert_eq!(output, "<a & b>");
    }

    #[test]
    fn test_minijinja_engine_drops_single_trailing_newline() {
        let dir = templates(&[("t.j2", "kind: Deployment\n")]);
        let engine = MiniJinjaEngine::new(dir.path());

        let output = render(&engine, "t.j2", &RenderContext::new()).unwrap();
        assert_eq!(output, "kind: Deployment");
    }

    #[test]
    fn test_minijinja_engine_missing_template() {
        let dir = templates(&[]);
        let engine = MiniJinjaEngine::new(dir.path());

        let err = engine.resolve("deployment.yaml.j2").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_minijinja_engine_syntax_error() {
        let dir = templates(&[("t.j2", "{{ unclosed")]);
        let engine = MiniJinjaEngine::new(dir.path());

        let err = engine.resolve("t.j2").unwrap_err();
        assert!(matches!(err, TemplateError::RenderingFailed { .. }));
    }

    #[test]
    fn test_minijinja_engine_lenient_and_strict_undefined() {
        let dir = templates(&[("t.j2", "value: {{ missing }}")]);

        let lenient = MiniJinjaEngine::new(dir.path());
        assert_eq!(render(&lenient, "t.j2", &RenderContext::new()).unwrap(), "value: ");

        let strict = MiniJinjaEngine::new(dir.path()).strict(true);
        let err = render(&strict, "t.j2", &RenderContext::new()).unwrap_err();
        assert!(matches!(err, TemplateError::RenderingFailed { .. }));
    }

    #[test]
    fn test_minijinja_engine_supports_features() {
        let engine = MiniJinjaEngine::new("templates");
        assert!(engine.supports_control_flow());
        assert!(engine.supports_filters());
    }
}
