//! stencil CLI: create new project trees from named templates.
//!
//! Two commands:
//! - `init` instantiates a template into a destination directory, rolling
//!   back everything it created if any step fails
//! - `list` prints the available templates

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "stencil",
    about = "Instantiate project trees from named, parameterized templates",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Root directory holding the template source trees [default: next to
    /// the executable, else the build checkout's templates/]
    #[arg(long, global = true, env = "STENCIL_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,

    /// JSON catalog of additional template definitions
    #[arg(long, global = true, env = "STENCIL_CATALOG")]
    catalog: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project tree from a template
    Init {
        /// Destination directory (created if missing)
        #[arg(default_value = ".")]
        dest: PathBuf,

        /// Template name, e.g. hello:python (prompts if omitted)
        #[arg(long, short)]
        template: Option<String>,

        /// Parameter override as key=value (repeatable)
        #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Render and log every step without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },

    /// List available templates
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let registry = commands::load_registry(cli.catalog.as_deref())?;
    let templates_dir = cli
        .templates_dir
        .unwrap_or_else(commands::default_templates_dir);

    match cli.command {
        Commands::Init {
            dest,
            template,
            params,
            dry_run,
        } => {
            commands::init::run(
                &registry,
                &templates_dir,
                &dest,
                template.as_deref(),
                &params,
                dry_run,
            )?;
        }
        Commands::List => {
            commands::list::run(&registry);
        }
    }

    Ok(())
}
