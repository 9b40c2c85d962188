//! Render command implementation and helpers

use std::path::Path;
use std::process::ExitCode;

use crate::command::parse::parse_size;
use crate::config::MapbotConfig;
use crate::output::save_png;
use crate::renderer::MapRenderer;
use crate::rpgmap::SquareMap;

use super::{display_path, load_fonts, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the render command
pub fn run_render(config: &MapbotConfig, size: &str, chits: &[String], output: &Path) -> ExitCode {
    let Some((width, height)) = parse_size(size.trim()) else {
        eprintln!("Error: Invalid size '{}'. Use WIDTHxHEIGHT format (e.g., '10x8')", size);
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    let map = match SquareMap::new(width, height) {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    for arg in chits {
        let Some((name, x, y)) = parse_chit_arg(arg) else {
            eprintln!("Error: Invalid chit '{}'. Use NAME@X,Y format (e.g., 'hero@3,4')", arg);
            return ExitCode::from(EXIT_INVALID_ARGS);
        };
        if let Err(e) = map.add_chit(name, x - 1, y - 1) {
            eprintln!("Error: chit '{}': {}", arg, e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    }

    let fonts = match load_fonts(config) {
        Ok(fonts) => fonts,
        Err(code) => return code,
    };

    let image = match MapRenderer::new(config.render_options()).render_map(&map, &fonts) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(e) = save_png(&image, output) {
        eprintln!("Error: Failed to save '{}': {}", display_path(output), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved {} ({}, {} chits)", display_path(output), map, map.chit_count());
    ExitCode::from(EXIT_SUCCESS)
}

/// Parse `NAME@X,Y`. The name may itself contain `@`; the last one splits.
fn parse_chit_arg(arg: &str) -> Option<(&str, i32, i32)> {
    let (name, coords) = arg.rsplit_once('@')?;
    let (x, y) = coords.split_once(',')?;
    if name.is_empty() {
        return None;
    }
    Some((name, x.trim().parse().ok()?, y.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chit_arg() {
        assert_eq!(parse_chit_arg("hero@3,4"), Some(("hero", 3, 4)));
        assert_eq!(parse_chit_arg("a@b@1, 2"), Some(("a@b", 1, 2)));
        assert_eq!(parse_chit_arg("hero@3"), None);
        assert_eq!(parse_chit_arg("@3,4"), None);
        assert_eq!(parse_chit_arg("hero@x,4"), None);
        assert_eq!(parse_chit_arg("hero"), None);
    }
}
