//! CLI command definitions.
//!
//! envtpl has a single action, rendering one environment, so the render
//! arguments are flattened into the top-level command.

use clap::Parser;

pub mod render;

/// envtpl - render manifest templates per environment
#[derive(Parser)]
#[command(name = "envtpl")]
#[command(version, about = "Render manifest templates from per-environment YAML configuration")]
#[command(long_about = r#"
envtpl reads envs.yaml, picks the environment given with --env, renders a
template from templates/ with that environment's data and writes the result
to <outdir>/deployment-<env>.yaml, or prints it with --dry-run.

EXAMPLES:
  envtpl --env dev
  envtpl --env prod --outdir out/manifests
  envtpl --env staging --dry-run

EXIT CODES:
  0  - Success
  1  - Configuration file not found
  2  - Environment not found (also invalid arguments)
  3  - Template not found
  4  - Output could not be written
  5  - Configuration file malformed
  6  - Template failed to render
  10 - Unexpected error
"#)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(flatten)]
    pub render: render::RenderArgs,
}
