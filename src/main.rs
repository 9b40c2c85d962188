//! Mapbot - command-line tool for grid maps rendered to PNG

use std::process::ExitCode;

use mapbot::cli;

fn main() -> ExitCode {
    cli::run()
}
