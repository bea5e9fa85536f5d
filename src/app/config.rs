use crate::game::constants::MAX_PLAYERS_DEFAULT;
use anyhow::Context;
use std::env;

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Logged when exceeded; connections are never refused.
    pub max_players: usize,
    pub reward_webhook_url: Option<String>,
    pub reward_webhook_secret: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match read("PORT") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {value:?}"))?,
            None => DEFAULT_PORT,
        };
        let max_players = match read("MAX_PLAYERS") {
            Some(value) => value
                .parse::<usize>()
                .with_context(|| format!("MAX_PLAYERS must be a count, got {value:?}"))?,
            None => MAX_PLAYERS_DEFAULT,
        };

        Ok(Self {
            port,
            max_players,
            reward_webhook_url: read("REWARD_WEBHOOK_URL"),
            reward_webhook_secret: read("REWARD_WEBHOOK_SECRET"),
        })
    }
}
