//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod render;
mod repl;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use crate::command::{CommandTable, Dispatcher};
use crate::config::{load_config, MapbotConfig};
use crate::font::FontCache;
use crate::registry::MapRegistry;
use crate::renderer::MapRenderer;
use crate::repl::DEFAULT_CHANNEL;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Mapbot - grid maps with colored chits, rendered to PNG
#[derive(Parser)]
#[command(name = "mapbot")]
#[command(about = "Mapbot - grid maps with colored chits, rendered to PNG")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: mapbot.toml in the current or a parent directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session
    Repl {
        /// Channel key the session starts on
        #[arg(long, default_value = DEFAULT_CHANNEL)]
        channel: String,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },
    /// Render a one-off map to a PNG file
    Render {
        /// Map size as WIDTHxHEIGHT (e.g., "10x8")
        #[arg(long)]
        size: String,

        /// Chit as NAME@X,Y with one-based coordinates (repeatable)
        #[arg(long = "chit")]
        chits: Vec<String>,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Run the CLI and return an exit code
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::Repl { channel, no_color } => repl::run_repl(&config, &channel, !no_color),
        Commands::Render { size, chits, output } => {
            render::run_render(&config, &size, &chits, &output)
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when embedded in a host process.
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(true).try_init();
}

/// Load the configured font, printing the error on failure.
pub(crate) fn load_fonts(config: &MapbotConfig) -> Result<FontCache, ExitCode> {
    FontCache::from_file(&config.font_path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Build a dispatcher over an empty registry.
pub(crate) fn build_dispatcher(config: &MapbotConfig, fonts: FontCache) -> Dispatcher {
    Dispatcher::new(
        Arc::new(MapRegistry::new()),
        Arc::new(fonts),
        MapRenderer::new(config.render_options()),
        CommandTable::new(),
    )
}

/// Display form of a path for messages.
pub(crate) fn display_path(path: &Path) -> String {
    path.display().to_string()
}
