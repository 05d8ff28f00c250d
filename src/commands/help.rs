// help.rs - Help Command Module
// This module implements the /help slash command, which answers with a fixed greeting.
//
// Used by: commands/mod.rs (command table)

use futures_util::future::BoxFuture;

use crate::error::PlatformError;
use crate::platform::{Interaction, Responder};

pub const GREETING: &str = "Hello digus";

/// Handle /help slash command
pub fn help<'a>(
    responder: &'a dyn Responder,
    interaction: &'a Interaction,
) -> BoxFuture<'a, Result<(), PlatformError>> {
    Box::pin(async move { responder.respond(interaction, GREETING).await })
}
