// config.rs - Command Line Configuration
// Parses the -t flag and turns it into the Config value handed to the gateway.

use clap::Parser;
use std::fmt;

use crate::error::BotError;

/// Minimal Discord bot that answers the /help slash command.
#[derive(Debug, Parser)]
#[command(name = "digus_bot", version)]
pub struct Cli {
    /// The secret token for the bot
    #[arg(short = 't', long = "token", default_value = "", hide_default_value = true)]
    pub token: String,
}

/// Bot token. Debug output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Token(<{} chars>)", self.0.len())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: Token,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, BotError> {
        if cli.token.is_empty() {
            return Err(BotError::MissingToken);
        }
        Ok(Self { token: Token(cli.token) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_flag() {
        let cli = Cli::parse_from(["digus_bot", "-t", "abc.def"]);
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.token.as_str(), "abc.def");
    }

    #[test]
    fn test_long_token_flag() {
        let cli = Cli::parse_from(["digus_bot", "--token", "xyz"]);
        assert_eq!(cli.token, "xyz");
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let cli = Cli::parse_from(["digus_bot"]);
        assert!(matches!(Config::from_cli(cli), Err(BotError::MissingToken)));
    }

    #[test]
    fn test_empty_token_is_config_error() {
        let cli = Cli::parse_from(["digus_bot", "-t", ""]);
        assert!(matches!(Config::from_cli(cli), Err(BotError::MissingToken)));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["digus_bot", "-x", "1"]).is_err());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let cli = Cli::parse_from(["digus_bot", "-t", "supersecret"]);
        let config = Config::from_cli(cli).unwrap();
        let shown = format!("{:?}", config);
        assert!(!shown.contains("supersecret"));
        assert!(shown.contains("11 chars"));
    }
}
