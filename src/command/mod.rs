//! Text command layer.
//!
//! Turns user input such as `addc "hero" (3, 4)` into calls on the
//! [`MapRegistry`](crate::registry::MapRegistry) and its maps, and turns the
//! results into [`Reply`] values a front end can show or deliver.
//!
//! The command table is an ordinary value built by [`CommandTable::new`];
//! nothing is registered globally.

mod dispatch;
pub mod parse;

pub use dispatch::{Dispatcher, MapImage, Reply, ReplyAction, ReplyStatus, MAP_NOT_FOUND};

/// What a command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Init,
    Clear,
    Size,
    ListChits,
    AddChit,
    DeleteChit,
    MoveChit,
    Png,
    Use,
    Help,
    Quit,
}

/// One entry of the command table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Name typed by the user
    pub name: &'static str,
    /// Argument synopsis shown in usage and help
    pub args_description: &'static str,
    /// One-line explanation shown in help
    pub description: &'static str,
    pub kind: CommandKind,
}

impl Command {
    /// Usage line, e.g. `addc "NAME" (X, Y)`.
    pub fn usage(&self) -> String {
        if self.args_description.is_empty() {
            self.name.to_string()
        } else {
            format!("{} {}", self.name, self.args_description)
        }
    }
}

/// The commands a front end accepts, in help order.
#[derive(Debug, Clone)]
pub struct CommandTable {
    commands: Vec<Command>,
}

impl CommandTable {
    pub fn new() -> Self {
        let command = |name: &'static str,
                       args_description: &'static str,
                       description: &'static str,
                       kind: CommandKind| Command {
            name,
            args_description,
            description,
            kind,
        };

        Self {
            commands: vec![
                command(
                    "init",
                    "WIDTH x HEIGHT",
                    "Create a map of the given size, replacing the current one",
                    CommandKind::Init,
                ),
                command("clear", "", "Delete the map", CommandKind::Clear),
                command("size", "", "Show the map size", CommandKind::Size),
                command("lsc", "", "List chits", CommandKind::ListChits),
                command("addc", r#""NAME" (X, Y)"#, "Add a chit", CommandKind::AddChit),
                command("delc", r#""NAME""#, "Delete a chit", CommandKind::DeleteChit),
                command("mvc", r#""NAME" (X, Y)"#, "Move a chit", CommandKind::MoveChit),
                command("png", "[FILE]", "Save the map as a PNG file", CommandKind::Png),
                command("use", "CHANNEL", "Switch to another channel's map", CommandKind::Use),
                command("help", "", "Show available commands", CommandKind::Help),
                command("quit", "", "Exit", CommandKind::Quit),
            ],
        }
    }

    /// Look up a command by name.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Usage and description of every command.
    pub fn help_text(&self) -> String {
        self.commands
            .iter()
            .map(|c| format!("{}\n    {}", c.usage(), c.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let table = CommandTable::new();
        assert_eq!(table.get("addc").map(|c| c.kind), Some(CommandKind::AddChit));
        assert_eq!(table.get("lsc").map(|c| c.kind), Some(CommandKind::ListChits));
        assert!(table.get("nope").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        let table = CommandTable::new();
        let mut names: Vec<_> = table.iter().map(|c| c.name).collect();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_usage() {
        let table = CommandTable::new();
        assert_eq!(table.get("size").unwrap().usage(), "size");
        assert_eq!(table.get("mvc").unwrap().usage(), r#"mvc "NAME" (X, Y)"#);
    }

    #[test]
    fn test_help_text_lists_every_command() {
        let table = CommandTable::new();
        let help = table.help_text();
        for command in table.iter() {
            assert!(help.contains(&command.usage()), "missing {}", command.name);
        }
        assert!(help.starts_with("init WIDTH x HEIGHT\n    Create a map"));
    }
}
