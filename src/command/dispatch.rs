//! Command dispatch: run one line of input against a channel's map.

use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;

use super::parse::{parse_chit_at, parse_chit_name, parse_size, split_command};
use super::{Command, CommandKind, CommandTable};
use crate::font::FontProvider;
use crate::registry::MapRegistry;
use crate::renderer::MapRenderer;
use crate::rpgmap::SquareMap;

/// Reply text when the channel has no map.
pub const MAP_NOT_FOUND: &str = "map not created";

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyStatus {
    Ok,
    /// Arguments did not match the command's syntax
    Usage,
    Error,
}

/// Follow-up the front end should carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyAction {
    /// Delete the channel's stored map image
    RemoveImage,
    /// Make this key the current channel
    SwitchChannel(String),
    Quit,
}

/// A rendered map attached to a reply.
#[derive(Debug, Clone)]
pub struct MapImage {
    pub image: RgbaImage,
    /// Requested file name; `None` means the channel's default image path
    pub file: Option<PathBuf>,
}

/// Result of dispatching one line.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: ReplyStatus,
    pub text: String,
    pub image: Option<MapImage>,
    /// Set when the command succeeded but its map could not be rendered
    pub render_error: Option<String>,
    pub action: Option<ReplyAction>,
}

impl Reply {
    fn ok(text: impl Into<String>) -> Self {
        Self { status: ReplyStatus::Ok, text: text.into(), image: None, render_error: None, action: None }
    }

    fn usage(command: &Command) -> Self {
        Self {
            status: ReplyStatus::Usage,
            text: format!("usage: {}", command.usage()),
            image: None,
            render_error: None,
            action: None,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self { status: ReplyStatus::Error, text: text.into(), image: None, render_error: None, action: None }
    }

    fn with_action(mut self, action: ReplyAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == ReplyStatus::Ok
    }
}

/// Runs text commands against a shared [`MapRegistry`].
///
/// One dispatcher serves every channel; the channel key is passed with each
/// line. It can be shared between threads.
pub struct Dispatcher {
    registry: Arc<MapRegistry>,
    fonts: Arc<dyn FontProvider + Send + Sync>,
    renderer: MapRenderer,
    commands: CommandTable,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<MapRegistry>,
        fonts: Arc<dyn FontProvider + Send + Sync>,
        renderer: MapRenderer,
        commands: CommandTable,
    ) -> Self {
        Self { registry, fonts, renderer, commands }
    }

    pub fn registry(&self) -> &MapRegistry {
        &self.registry
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Run one line of input for `channel`.
    ///
    /// Returns `None` for blank input.
    pub fn dispatch(&self, channel: &str, line: &str) -> Option<Reply> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let Some((name, args)) = split_command(line) else {
            return Some(Reply::error(format!("invalid command: {}", line)));
        };
        let Some(command) = self.commands.get(name) else {
            return Some(Reply::error(format!("invalid command: {}", name)));
        };

        tracing::debug!(channel, command = command.name, "dispatching command");

        let reply = match command.kind {
            CommandKind::Init => self.init_map(channel, command, args),
            CommandKind::Clear => self.clear_map(channel),
            CommandKind::Size => self.with_map(channel, |map| Reply::ok(map.size_str())),
            CommandKind::ListChits => self.with_map(channel, list_chits),
            CommandKind::AddChit => self.add_chit(channel, command, args),
            CommandKind::DeleteChit => self.delete_chit(channel, command, args),
            CommandKind::MoveChit => self.move_chit(channel, command, args),
            CommandKind::Png => self.png(channel, command, args),
            CommandKind::Use => switch_channel(command, args),
            CommandKind::Help => Reply::ok(self.commands.help_text()),
            CommandKind::Quit => Reply::ok("").with_action(ReplyAction::Quit),
        };

        Some(reply)
    }

    fn with_map(&self, channel: &str, f: impl FnOnce(&SquareMap) -> Reply) -> Reply {
        match self.registry.get(channel) {
            Some(map) => f(&map),
            None => Reply::error(MAP_NOT_FOUND),
        }
    }

    fn init_map(&self, channel: &str, command: &Command, args: &str) -> Reply {
        let Some((width, height)) = parse_size(args) else {
            return Reply::usage(command);
        };

        match self.registry.initialize(channel, width, height) {
            Ok(map) => self.reply_with_map(command, &map, map.to_string()),
            Err(e) => command_error(command, e),
        }
    }

    fn clear_map(&self, channel: &str) -> Reply {
        if self.registry.clear(channel) {
            Reply::ok("map cleared").with_action(ReplyAction::RemoveImage)
        } else {
            Reply::error(MAP_NOT_FOUND)
        }
    }

    fn add_chit(&self, channel: &str, command: &Command, args: &str) -> Reply {
        let Some((name, x, y)) = parse_chit_at(args) else {
            return Reply::usage(command);
        };

        self.with_map(channel, |map| match map.add_chit(&name, x - 1, y - 1) {
            Ok(chit) => self.reply_with_map(command, map, chit.to_string()),
            Err(e) => command_error(command, e),
        })
    }

    fn delete_chit(&self, channel: &str, command: &Command, args: &str) -> Reply {
        let Some(name) = parse_chit_name(args) else {
            return Reply::usage(command);
        };

        self.with_map(channel, |map| match map.delete_chit(&name) {
            Ok(()) => self.reply_with_map(command, map, format!("deleted chit \"{}\"", name)),
            Err(e) => command_error(command, e),
        })
    }

    fn move_chit(&self, channel: &str, command: &Command, args: &str) -> Reply {
        let Some((name, x, y)) = parse_chit_at(args) else {
            return Reply::usage(command);
        };

        self.with_map(channel, |map| match map.move_chit(&name, x - 1, y - 1) {
            Ok(chit) => self.reply_with_map(command, map, chit.to_string()),
            Err(e) => command_error(command, e),
        })
    }

    fn png(&self, channel: &str, command: &Command, args: &str) -> Reply {
        let file = (!args.is_empty()).then(|| PathBuf::from(args));

        self.with_map(channel, |map| match self.renderer.render_map(map, self.fonts.as_ref()) {
            Ok(image) => {
                let mut reply = Reply::ok("");
                reply.image = Some(MapImage { image, file });
                reply
            }
            Err(e) => command_error(command, e),
        })
    }

    /// Success reply for a committed mutation, carrying a fresh render of
    /// `map`. A failed render does not turn the reply into an error.
    fn reply_with_map(&self, command: &Command, map: &SquareMap, text: String) -> Reply {
        let mut reply = Reply::ok(text);
        match self.renderer.render_map(map, self.fonts.as_ref()) {
            Ok(image) => reply.image = Some(MapImage { image, file: None }),
            Err(e) => {
                tracing::warn!(command = command.name, error = %e, "map changed but could not be rendered");
                reply.render_error = Some(format!("{}: {}", command.name, e));
            }
        }
        reply
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

fn command_error(command: &Command, e: impl std::fmt::Display) -> Reply {
    Reply::error(format!("{}: {}", command.name, e))
}

fn list_chits(map: &SquareMap) -> Reply {
    let mut lines = Vec::with_capacity(map.chit_count());
    map.for_each_chit(|_, chit| lines.push(chit.to_string()));

    if lines.is_empty() {
        Reply::ok("(no chits)")
    } else {
        Reply::ok(lines.join("\n"))
    }
}

fn switch_channel(command: &Command, args: &str) -> Reply {
    if args.is_empty() || args.contains(char::is_whitespace) {
        return Reply::usage(command);
    }

    Reply::ok(format!("channel: {}", args)).with_action(ReplyAction::SwitchChannel(args.to_string()))
}
