//! availcheck — platform availability checker command-line interface.

mod commands;
mod logging;
mod manifest;
mod unit;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use logging::LogSettings;
use manifest::ProjectManifest;

#[derive(Parser)]
#[command(name = "availcheck", version, about = "Platform availability checker")]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a unit file and print availability diagnostics
    Check {
        /// Unit file (.unit.toml)
        unit: PathBuf,
        /// Target triple (e.g., i386-apple-watchos3.0)
        #[arg(long)]
        target: Option<String>,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Check a unit file against its expected diagnostics
    Verify {
        /// Unit file (.unit.toml)
        unit: PathBuf,
        /// Target triple (e.g., i386-apple-watchos3.0)
        #[arg(long)]
        target: Option<String>,
    },
    /// Inspect target triples
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
}

#[derive(Subcommand)]
enum TargetAction {
    /// List supported target OS names
    List,
    /// Show the platform and deployment target a triple selects
    Describe {
        /// Target triple
        triple: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = ProjectManifest::find_and_load(&cwd)?.map(|(m, _)| m);

    let manifest_logging = manifest
        .as_ref()
        .map(ProjectManifest::log_settings)
        .unwrap_or_default();
    let options = LogSettings::from_strs(cli.log_format.as_deref(), cli.log_level.as_deref())
        .or(LogSettings::from_env())
        .or(manifest_logging)
        .resolve();
    logging::init_logging(options);
    tracing::debug!(level = %options.level, format = %options.format, "logging initialised");

    match cli.command {
        Commands::Check {
            unit,
            target,
            format,
        } => commands::check::run(&unit, manifest.as_ref(), target.as_deref(), format.as_deref()),
        Commands::Verify { unit, target } => {
            commands::verify::run(&unit, manifest.as_ref(), target.as_deref())
        }
        Commands::Target { action } => match action {
            TargetAction::List => commands::target::list(),
            TargetAction::Describe { triple } => commands::target::describe(&triple),
        },
    }
}
