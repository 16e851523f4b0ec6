//! Render command - Render one environment's manifest.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use tracing::info;

use envtpl_core::settings::{DEFAULT_OUTDIR, DEFAULT_TEMPLATE};
use envtpl_core::{
    CoreError, Emitted, OutputMode, OutputSink, Pipeline, PipelineSettings, RenderRequest,
};
use envtpl_templates::{MiniJinjaEngine, PlaceholderEngine, TemplateEngine};

/// Substitution language used for templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// Jinja2-compatible templates (loops, conditionals, filters)
    Jinja,
    /// Plain {{ key.path }} substitution
    Placeholder,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Environment name (dev/staging/prod)
    #[arg(short, long)]
    pub env: String,

    /// Template file inside the templates directory
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Directory where the rendered manifest will be written
    #[arg(short, long, default_value = DEFAULT_OUTDIR)]
    pub outdir: PathBuf,

    /// Print rendered manifest to stdout instead of writing to file
    #[arg(short, long)]
    pub dry_run: bool,

    /// Directory relative paths are resolved against (default: current directory)
    #[arg(long, env = "ENVTPL_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Environment configuration file (default: <base-dir>/envs.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Templates directory (default: <base-dir>/templates)
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,

    /// Template engine
    #[arg(long, value_enum, default_value_t = EngineKind::Jinja)]
    pub engine: EngineKind,

    /// Fail on undefined template variables
    #[arg(long)]
    pub strict: bool,
}

pub fn execute(args: RenderArgs, quiet: bool) -> Result<()> {
    let base_dir = match args.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let mut settings = PipelineSettings::new(base_dir);
    if let Some(config) = &args.config {
        settings = settings.with_config_path(config);
    }
    if let Some(templates_dir) = &args.templates_dir {
        settings = settings.with_templates_dir(templates_dir);
    }

    info!(
        "Rendering {} for environment {} ({:?} engine)",
        args.template, args.env, args.engine
    );

    let engine = build_engine(args.engine, &settings, args.strict)?;
    let pipeline = Pipeline::new(settings, engine);

    let mode = if args.dry_run {
        OutputMode::DryRun
    } else {
        OutputMode::Write {
            outdir: pipeline.settings().resolve(&args.outdir),
        }
    };
    let mut sink = OutputSink::stdout(mode);

    let request = RenderRequest::new(args.env).with_template(args.template);
    let emitted = pipeline.run(&request, &mut sink)?;

    if let Emitted::Written(path) = emitted {
        if !quiet {
            println!("[INFO] Wrote rendered manifest to {}", path.display());
            println!("[OK] Render finished.");
        }
    }

    Ok(())
}

fn build_engine(
    kind: EngineKind,
    settings: &PipelineSettings,
    strict: bool,
) -> Result<Box<dyn TemplateEngine>, CoreError> {
    let engine: Box<dyn TemplateEngine> = match kind {
        EngineKind::Jinja => Box::new(MiniJinjaEngine::new(settings.templates_dir()).strict(strict)),
        EngineKind::Placeholder => {
            Box::new(PlaceholderEngine::new(settings.templates_dir())?.strict(strict))
        }
    };
    Ok(engine)
}
