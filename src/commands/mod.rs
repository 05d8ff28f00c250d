// commands/mod.rs - Command Table
// Declares the slash command modules and the fixed set of commands the bot
// registers with Discord on startup.

pub mod help;           // /help greeting
pub mod slash;          // Interaction dispatch by command name

use futures_util::future::BoxFuture;

use crate::error::PlatformError;
use crate::platform::{Interaction, Responder};

/// Slash command handler. Receives the reply channel and the invocation.
pub type CommandFn =
    for<'a> fn(&'a dyn Responder, &'a Interaction) -> BoxFuture<'a, Result<(), PlatformError>>;

/// Local definition of a slash command before it is registered remotely
#[derive(Clone, Copy)]
pub struct SlashCommand {
    pub name: &'static str,
    pub description: &'static str,
    pub handler: CommandFn,
}

impl std::fmt::Debug for SlashCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("SlashCommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Commands registered at startup, in registration order
pub fn default_commands() -> Vec<SlashCommand> {
    vec![SlashCommand {
        name: "help",
        description: "gives you help",
        handler: help::help,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_commands() {
        let commands = default_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "help");
        assert_eq!(commands[0].description, "gives you help");
    }
}
