use std::env;

use poise::serenity_prelude::{ChannelId, RoleId, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} holds an invalid value")]
    Invalid(&'static str),
}

/// Runtime configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub riot_api_key: String,
    /// Channel receiving every tracking alert.
    pub alert_channel: ChannelId,
    /// Role a member must carry to be registered, if any.
    pub required_role: Option<RoleId>,
    /// User receiving an extra mention on each of their losses, if any.
    pub loss_alert_user: Option<UserId>,
    pub poll_interval_secs: u64,
    pub snapshot_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
        const DEFAULT_SNAPSHOT_PATH: &str = "players.json";

        let discord_token =
            env::var("DISCORD_TOKEN").map_err(|_| ConfigError::Missing("DISCORD_TOKEN"))?;

        let riot_api_key =
            env::var("RIOT_API_KEY").map_err(|_| ConfigError::Missing("RIOT_API_KEY"))?;

        let alert_channel = env::var("ALERT_CHANNEL_ID")
            .map_err(|_| ConfigError::Missing("ALERT_CHANNEL_ID"))?
            .parse::<u64>()
            .map(ChannelId::new)
            .map_err(|_| ConfigError::Invalid("ALERT_CHANNEL_ID"))?;

        let required_role = parse_optional_id("REQUIRED_ROLE_ID")?.map(RoleId::new);
        let loss_alert_user = parse_optional_id("LOSS_ALERT_USER_ID")?.map(UserId::new);

        let poll_interval_secs = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        let snapshot_path =
            env::var("SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.into());

        Ok(Self {
            discord_token,
            riot_api_key,
            alert_channel,
            required_role,
            loss_alert_user,
            poll_interval_secs,
            snapshot_path,
        })
    }
}

fn parse_optional_id(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(var)),
        Err(_) => Ok(None),
    }
}
