//! Repl command implementation

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use crate::config::MapbotConfig;
use crate::repl::Repl;

use super::{build_dispatcher, load_fonts, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the repl command
pub fn run_repl(config: &MapbotConfig, channel: &str, colors: bool) -> ExitCode {
    let fonts = match load_fonts(config) {
        Ok(fonts) => fonts,
        Err(code) => return code,
    };

    let stdout = io::stdout();
    let mut repl = Repl::new(build_dispatcher(config, fonts), &config.image_dir)
        .with_channel(channel)
        .with_colors(colors && stdout.is_terminal());

    tracing::info!(channel, image_dir = %config.image_dir.display(), "starting repl");

    let stdin = io::stdin();
    match repl.run(stdin.lock(), &mut stdout.lock()) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: REPL failed: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
