// bot.rs - Bot Lifecycle
// Owns the platform session, the commands registered with it and the local
// dispatch map. Startup opens the session and registers the command table;
// stop unregisters everything and closes the session.

use std::sync::Arc;

use crate::commands::slash::Dispatcher;
use crate::commands::{self, SlashCommand};
use crate::error::BotError;
use crate::platform::{Platform, RegisteredCommand};

pub struct Bot<P: Platform> {
    platform: P,
    registered: Vec<RegisteredCommand>,
    dispatcher: Dispatcher,
}

impl<P: Platform> Bot<P> {
    /// Open the session and register the default command table.
    ///
    /// If registration fails the session is left open and the commands that
    /// were already created stay registered on Discord.
    pub async fn new(platform: P) -> Result<Self, BotError> {
        let mut bot = Self::connect(platform).await?;
        bot.register_commands(&commands::default_commands()).await?;
        Ok(bot)
    }

    /// Open the session without registering anything yet
    pub async fn connect(mut platform: P) -> Result<Self, BotError> {
        platform.open().await.map_err(BotError::Connection)?;
        Ok(Self {
            platform,
            registered: Vec::new(),
            dispatcher: Dispatcher::new(),
        })
    }

    /// Create each command remotely, in order, and route its name to its
    /// handler. Stops at the first failure; nothing is rolled back. The
    /// event listener is attached only once every command is registered.
    pub async fn register_commands(&mut self, commands: &[SlashCommand]) -> Result<(), BotError> {
        for command in commands {
            let registered = self
                .platform
                .create_command(command)
                .await
                .map_err(|source| BotError::Registration {
                    name: command.name.to_string(),
                    source,
                })?;
            log::debug!("Registered /{} as {}", command.name, registered.id);
            self.registered.push(registered);
            self.dispatcher.insert(command.name, command.handler);
        }

        self.platform.subscribe(Arc::new(self.dispatcher.clone()));
        log::info!("Registered {} slash command(s) with Discord", self.registered.len());
        Ok(())
    }

    pub fn registered(&self) -> &[RegisteredCommand] {
        &self.registered
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Delete every registered command in registration order, then close the
    /// session. The first failed delete aborts and the session stays open.
    pub async fn stop(mut self) -> Result<(), BotError> {
        for command in &self.registered {
            self.platform
                .delete_command(command)
                .await
                .map_err(|source| BotError::Deletion {
                    name: command.name.clone(),
                    source,
                })?;
            log::info!("Deleted /{} ({})", command.name, command.id);
        }
        self.platform.close().await;
        Ok(())
    }
}
