// platform.rs - Remote Platform Boundary
// The calls the bot makes against Discord, as traits so the lifecycle and
// dispatch code can run without a live gateway connection.
//
// Used by: bot.rs (lifecycle), commands/ (replies), gateway.rs (serenity impl)

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::commands::slash::Dispatcher;
use crate::commands::SlashCommand;
use crate::error::PlatformError;

/// Platform-issued application command id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(pub u64);

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A command the platform has acknowledged. Kept only so it can be deleted
/// again on shutdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredCommand {
    pub id: CommandId,
    pub name: String,
}

/// An inbound slash command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub id: u64,
    /// Continuation token used to answer this interaction
    pub token: String,
    pub command_name: String,
    pub user: String,
}

/// Reply channel handed to command handlers
#[async_trait]
pub trait Responder: Send + Sync {
    /// Answer the interaction with a plain channel message
    async fn respond(&self, interaction: &Interaction, content: &str) -> Result<(), PlatformError>;
}

#[async_trait]
pub trait Platform: Responder {
    /// Open the authenticated session. Returns once the session is usable.
    async fn open(&mut self) -> Result<(), PlatformError>;

    async fn create_command(&self, command: &SlashCommand) -> Result<RegisteredCommand, PlatformError>;

    async fn delete_command(&self, command: &RegisteredCommand) -> Result<(), PlatformError>;

    /// Route every inbound application command interaction through `dispatcher`
    fn subscribe(&self, dispatcher: Arc<Dispatcher>);

    async fn close(&mut self);
}
