mod bot;
mod commands;
mod config;
mod error;
mod gateway;
mod platform;

use clap::{CommandFactory, Parser};
use tokio::signal;

use crate::bot::Bot;
use crate::config::{Cli, Config};
use crate::gateway::Gateway;

#[tokio::main]
async fn main() {
    // Initialize logger - must be done before any logging calls
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let config = match Config::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(_) => {
            eprintln!("{}", Cli::command().render_help());
            std::process::exit(1);
        }
    };

    let bot = match Bot::new(Gateway::new(config)).await {
        Ok(bot) => bot,
        Err(e) => {
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    log::debug!("Dispatching {:?}", bot.dispatcher());
    log::info!(
        "🚀 Bot is running with {} slash command(s). Press Ctrl+C to exit",
        bot.registered().len()
    );
    if let Err(e) = signal::ctrl_c().await {
        log::error!("❌ Failed to listen for Ctrl+C: {}", e);
    }
    log::info!("⏹️ Stopping bot...");

    if let Err(e) = bot.stop().await {
        log::error!("❌ Error stopping bot: {}", e);
        std::process::exit(1);
    }
    log::info!("✅ Bot stopped");
}
