// error.rs - Bot Error Types
// Every failure the bot can hit during startup or shutdown. All of them are
// terminal: main logs the error and exits with status 1.

use thiserror::Error;

/// Error returned by the remote platform (serenity or a test double)
pub type PlatformError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("no bot token given, pass one with -t <token>")]
    MissingToken,

    #[error("error opening Discord session: {0}")]
    Connection(#[source] PlatformError),

    #[error("error registering command '{name}': {source}")]
    Registration {
        name: String,
        #[source]
        source: PlatformError,
    },

    #[error("error deleting command '{name}': {source}")]
    Deletion {
        name: String,
        #[source]
        source: PlatformError,
    },
}
