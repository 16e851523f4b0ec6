//! # envtpl_templates
//!
//! Template resolution and rendering for envtpl.
//!
//! Templates are plain files inside a template directory, referenced by a
//! logical name such as `deployment.yaml.j2`. Rendering goes through the
//! [`TemplateEngine`] trait, so the substitution language is pluggable:
//!
//! - [`MiniJinjaEngine`] - Jinja2-compatible syntax (loops, conditionals, filters)
//! - [`PlaceholderEngine`] - plain `{{ key.path }}` substitution
//!
//! ## Example
//!
//! ```rust,no_run
//! use envtpl_templates::{MiniJinjaEngine, RenderContext, TemplateRenderer};
//!
//! let context: RenderContext = serde_yaml::from_str("replicas: 2").unwrap();
//! let renderer = TemplateRenderer::new(MiniJinjaEngine::new("templates"));
//!
//! let manifest = renderer.render("deployment.yaml.j2", &context).unwrap();
//! println!("{manifest}");
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod loader;
pub mod placeholder;
pub mod renderer;

pub use context::RenderContext;
pub use engine::{MiniJinjaEngine, ResolvedTemplate, TemplateEngine};
pub use error::{TemplateError, TemplateResult};
pub use loader::TemplateLoader;
pub use placeholder::PlaceholderEngine;
pub use renderer::TemplateRenderer;
