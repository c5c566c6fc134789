use poise::serenity_prelude as serenity;
use std::path::PathBuf;
use thiserror::Error;

use crate::data::stats::leaderboard::LeaderboardStyle;

const DEFAULT_MOTM_ICON: &str = "<:MOTM:1411802660029468744>";
const DEFAULT_DOTM_ICON: &str = "<:defender:1411802703775924224>";
const DEFAULT_CLEANUP_WINDOW: u8 = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("{key} must be a Discord id, got '{value}'")]
    InvalidId { key: &'static str, value: String },
    #[error("LEADERBOARD_STYLE must be 'roster' or 'ranked', got '{0}'")]
    InvalidStyle(String),
    #[error("CLEANUP_WINDOW must be between 0 and 100, got '{0}'")]
    InvalidCleanupWindow(String),
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub command_prefix: String,
    pub results_channel: serenity::ChannelId,
    pub stats_channel: serenity::ChannelId,
    pub tracked_role: serenity::RoleId,
    pub admin_role: Option<serenity::RoleId>,
    pub motm_icon: String,
    pub dotm_icon: String,
    pub leaderboard_style: LeaderboardStyle,
    /// How many recent stats-channel messages are checked for stale reports.
    pub cleanup_window: u8,
    /// Stats are memory-only when unset.
    pub stats_db_path: Option<PathBuf>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let token = get("DISCORD_TOKEN")
            .or_else(|| get("TOKEN"))
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let id = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            match get(key) {
                None => Ok(None),
                Some(v) => match v.parse::<u64>() {
                    Ok(n) if n > 0 => Ok(Some(n)),
                    _ => Err(ConfigError::InvalidId { key, value: v }),
                },
            }
        };
        let required = |key: &'static str| -> Result<u64, ConfigError> { id(key)?.ok_or(ConfigError::Missing(key)) };

        let leaderboard_style = match get("LEADERBOARD_STYLE") {
            Some(v) => v.parse::<LeaderboardStyle>().map_err(ConfigError::InvalidStyle)?,
            None => LeaderboardStyle::default(),
        };

        let cleanup_window = match get("CLEANUP_WINDOW") {
            Some(v) => match v.parse::<u8>() {
                Ok(n) if n <= 100 => n,
                _ => return Err(ConfigError::InvalidCleanupWindow(v)),
            },
            None => DEFAULT_CLEANUP_WINDOW,
        };

        Ok(Self {
            token,
            command_prefix: get("COMMAND_PREFIX").unwrap_or_else(|| "!".to_string()),
            results_channel: serenity::ChannelId::new(required("RESULTS_CHANNEL_ID")?),
            stats_channel: serenity::ChannelId::new(required("STATS_CHANNEL_ID")?),
            tracked_role: serenity::RoleId::new(required("TRACKED_ROLE_ID")?),
            admin_role: id("ADMIN_ROLE_ID")?.map(serenity::RoleId::new),
            motm_icon: get("MOTM_ICON").unwrap_or_else(|| DEFAULT_MOTM_ICON.to_string()),
            dotm_icon: get("DOTM_ICON").unwrap_or_else(|| DEFAULT_DOTM_ICON.to_string()),
            leaderboard_style,
            cleanup_window,
            stats_db_path: get("STATS_DB_PATH").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("DISCORD_TOKEN", "abc"),
        ("RESULTS_CHANNEL_ID", "1353497689693618226"),
        ("STATS_CHANNEL_ID", "1389031896008101961"),
        ("TRACKED_ROLE_ID", "1353499162502631484"),
    ];

    #[test]
    fn defaults_fill_optional_keys() {
        let cfg = BotConfig::from_lookup(lookup(BASE)).unwrap();
        assert_eq!(cfg.results_channel.get(), 1353497689693618226);
        assert_eq!(cfg.tracked_role.get(), 1353499162502631484);
        assert_eq!(cfg.command_prefix, "!");
        assert_eq!(cfg.motm_icon, DEFAULT_MOTM_ICON);
        assert_eq!(cfg.leaderboard_style, LeaderboardStyle::Roster);
        assert_eq!(cfg.cleanup_window, 10);
        assert!(cfg.admin_role.is_none());
        assert!(cfg.stats_db_path.is_none());
    }

    #[test]
    fn optional_keys_are_read() {
        let mut pairs = BASE.to_vec();
        pairs.extend([
            ("ADMIN_ROLE_ID", "42"),
            ("LEADERBOARD_STYLE", "ranked"),
            ("CLEANUP_WINDOW", "25"),
            ("STATS_DB_PATH", "data/stats"),
            ("MOTM_ICON", ":star:"),
        ]);
        let cfg = BotConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(cfg.admin_role.map(|r| r.get()), Some(42));
        assert_eq!(cfg.leaderboard_style, LeaderboardStyle::Ranked);
        assert_eq!(cfg.cleanup_window, 25);
        assert_eq!(cfg.stats_db_path, Some(PathBuf::from("data/stats")));
        assert_eq!(cfg.motm_icon, ":star:");
    }

    #[test]
    fn legacy_token_key_is_accepted() {
        let mut pairs: Vec<_> = BASE.iter().copied().filter(|(k, _)| *k != "DISCORD_TOKEN").collect();
        pairs.push(("TOKEN", "legacy"));
        assert_eq!(BotConfig::from_lookup(lookup(&pairs)).unwrap().token, "legacy");
    }

    #[test]
    fn bad_values_are_reported() {
        let missing: Vec<_> = BASE.iter().copied().filter(|(k, _)| *k != "STATS_CHANNEL_ID").collect();
        assert_eq!(
            BotConfig::from_lookup(lookup(&missing)).unwrap_err(),
            ConfigError::Missing("STATS_CHANNEL_ID")
        );

        let mut bad_id = BASE.to_vec();
        bad_id.push(("ADMIN_ROLE_ID", "admins"));
        assert!(matches!(
            BotConfig::from_lookup(lookup(&bad_id)).unwrap_err(),
            ConfigError::InvalidId { key: "ADMIN_ROLE_ID", .. }
        ));

        let mut bad_style = BASE.to_vec();
        bad_style.push(("LEADERBOARD_STYLE", "fancy"));
        assert_eq!(
            BotConfig::from_lookup(lookup(&bad_style)).unwrap_err(),
            ConfigError::InvalidStyle("fancy".to_string())
        );

        let mut bad_window = BASE.to_vec();
        bad_window.push(("CLEANUP_WINDOW", "101"));
        assert_eq!(
            BotConfig::from_lookup(lookup(&bad_window)).unwrap_err(),
            ConfigError::InvalidCleanupWindow("101".to_string())
        );
    }
}
