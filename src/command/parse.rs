//! Argument parsing for text commands.
//!
//! Coordinates are returned exactly as typed (one-based); converting them to
//! map coordinates is the caller's job.

use regex::Regex;
use std::sync::OnceLock;

fn command_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([-!a-z]+)(?:\s+(.+))?$").expect("command regex is valid"))
}

fn size_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\s*x\s*(\d+)$").expect("size regex is valid"))
}

fn chit_at_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^"([^"]+)"\s*\((\d+),\s*(\d+)\)$"#).expect("chit position regex is valid")
    })
}

fn chit_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^"([^"]+)"$"#).expect("chit name regex is valid"))
}

/// Split a line into command name and (trimmed) argument string.
///
/// Returns `None` if the line does not start with a command name.
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let caps = command_re().captures(line.trim())?;
    let name = caps.get(1)?.as_str();
    let args = caps.get(2).map_or("", |m| m.as_str().trim_end());
    Some((name, args))
}

/// Parse `WIDTH x HEIGHT`.
pub fn parse_size(args: &str) -> Option<(i32, i32)> {
    let caps = size_re().captures(args)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// Parse `"NAME" (X, Y)`.
pub fn parse_chit_at(args: &str) -> Option<(String, i32, i32)> {
    let caps = chit_at_re().captures(args)?;
    Some((caps[1].to_string(), caps[2].parse().ok()?, caps[3].parse().ok()?))
}

/// Parse `"NAME"`.
pub fn parse_chit_name(args: &str) -> Option<String> {
    chit_name_re().captures(args).map(|caps| caps[1].to_string())
}
