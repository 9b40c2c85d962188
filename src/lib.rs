//! Mapbot - per-channel grid maps with colored chits
//!
//! This library provides functionality to:
//! - Keep one square grid map per channel, holding named, colored chits
//! - Render a map and its legend to an RGBA image and PNG file
//! - Drive maps through short text commands (`init`, `addc`, `mvc`, ...)

pub mod cli;
pub mod color;
pub mod command;
pub mod config;
pub mod font;
pub mod output;
pub mod palette;
pub mod registry;
pub mod renderer;
pub mod repl;
pub mod rpgmap;
