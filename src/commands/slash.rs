// slash.rs - Slash Command Dispatch
// Routes inbound interactions to their handler by exact command name.
//
// The map is built once while commands are registered and never mutated
// afterwards, so the gateway may dispatch from many tasks at once without
// locking.

use std::collections::HashMap;

use super::CommandFn;
use crate::platform::{Interaction, Responder};

#[derive(Default, Clone)]
pub struct Dispatcher {
    handlers: HashMap<String, CommandFn>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts under the same name replace earlier ones.
    pub fn insert(&mut self, name: &str, handler: CommandFn) {
        self.handlers.insert(name.to_string(), handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Run the handler registered for the interaction's command, if any.
    /// Returns whether a handler ran. Unknown commands are ignored.
    pub async fn dispatch(&self, responder: &dyn Responder, interaction: &Interaction) -> bool {
        let Some(handler) = self.handlers.get(&interaction.command_name) else {
            log::debug!("Ignoring unregistered command '{}'", interaction.command_name);
            return false;
        };

        // Reply failures stop at the log; there is nobody else to tell.
        if let Err(e) = handler(responder, interaction).await {
            log::warn!(
                "Failed to answer /{} for {}: {}",
                interaction.command_name,
                interaction.user,
                e
            );
        }
        true
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut names: Vec<&String> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("Dispatcher").field("commands", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::help;
    use crate::error::PlatformError;
    use crate::platform::fake::{interaction, Call, FakePlatform};
    use futures_util::future::BoxFuture;

    fn shout<'a>(
        responder: &'a dyn Responder,
        interaction: &'a Interaction,
    ) -> BoxFuture<'a, Result<(), PlatformError>> {
        Box::pin(async move { responder.respond(interaction, "HEY").await })
    }

    #[tokio::test]
    async fn test_dispatch_known_command_runs_handler_once() {
        let platform = FakePlatform::new();
        let mut dispatcher = Dispatcher::new();
        dispatcher.insert("help", help::help);

        assert!(dispatcher.dispatch(&platform, &interaction("help")).await);
        assert_eq!(platform.count(|c| matches!(c, Call::Respond { .. })), 1);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_command_is_ignored() {
        let platform = FakePlatform::new();
        let mut dispatcher = Dispatcher::new();
        dispatcher.insert("help", help::help);

        assert!(!dispatcher.dispatch(&platform, &interaction("unknown")).await);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_is_exact_match() {
        let platform = FakePlatform::new();
        let mut dispatcher = Dispatcher::new();
        dispatcher.insert("help", help::help);

        assert!(!dispatcher.dispatch(&platform, &interaction("HELP")).await);
        assert!(!dispatcher.dispatch(&platform, &interaction("help ")).await);
        assert!(platform.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_picks_matching_handler_only() {
        let platform = FakePlatform::new();
        let mut dispatcher = Dispatcher::new();
        dispatcher.insert("help", help::help);
        dispatcher.insert("shout", shout);

        dispatcher.dispatch(&platform, &interaction("shout")).await;
        assert_eq!(
            platform.calls(),
            vec![Call::Respond {
                command: "shout".to_string(),
                content: "HEY".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_duplicate_name_overwrites() {
        let platform = FakePlatform::new();
        let mut dispatcher = Dispatcher::new();
        dispatcher.insert("help", help::help);
        dispatcher.insert("help", shout);

        assert_eq!(dispatcher.len(), 1);
        dispatcher.dispatch(&platform, &interaction("help")).await;
        assert_eq!(
            platform.calls(),
            vec![Call::Respond {
                command: "help".to_string(),
                content: "HEY".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_reply_failure_is_swallowed() {
        let platform = FakePlatform::failing_respond();
        let mut dispatcher = Dispatcher::new();
        dispatcher.insert("help", help::help);

        assert!(dispatcher.dispatch(&platform, &interaction("help")).await);
    }
}
