// Startup configuration, read from the environment (and `.env` via dotenv).

use thiserror::Error;

use crate::core::profiles::ProfileSettings;
use crate::infra::profiles::ApiConfig;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_FOOTER_NOTE: &str = "Join discord.gg/tohe for any questions";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),

    #[error("{name} contains an invalid id: {value:?}")]
    InvalidId { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_token: String,
    pub api: ApiConfig,
    pub profiles: ProfileSettings,
    /// Register commands in this guild only (instant updates while developing).
    pub dev_guild_id: Option<u64>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, so tests don't have to touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let discord_token = required("DISCORD_TOKEN")?;
        let token = required("PROFILE_API_TOKEN")?;
        let base_url = lookup("PROFILE_API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let developer_ids = match lookup("DEVELOPER_IDS") {
            Some(raw) => parse_ids("DEVELOPER_IDS", &raw)?,
            None => Vec::new(),
        };

        // Set but blank turns the note off.
        let footer_note = match lookup("PROFILE_FOOTER_NOTE") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(raw.trim().to_string()),
            None => Some(DEFAULT_FOOTER_NOTE.to_string()),
        };

        let dev_guild_id = match lookup("DEV_GUILD_ID").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidId {
                name: "DEV_GUILD_ID",
                value: raw.clone(),
            })?),
            None => None,
        };

        Ok(Self {
            discord_token,
            api: ApiConfig { base_url, token },
            profiles: ProfileSettings {
                developer_ids,
                footer_note,
            },
            dev_guild_id,
        })
    }
}

fn parse_ids(name: &'static str, raw: &str) -> Result<Vec<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>().map_err(|_| ConfigError::InvalidId {
                name,
                value: part.to_string(),
            })
        })
        .collect()
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_api_url_and_parses_developers() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "discord"),
            ("PROFILE_API_TOKEN", "api"),
            ("DEVELOPER_IDS", "123, 456,"),
        ]))
        .unwrap();

        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.token, "api");
        assert_eq!(config.profiles.developer_ids, vec![123, 456]);
        assert_eq!(config.dev_guild_id, None);
        assert_eq!(
            config.profiles.footer_note.as_deref(),
            Some(DEFAULT_FOOTER_NOTE)
        );
    }

    #[test]
    fn footer_note_can_be_replaced_or_cleared() {
        let base = [("DISCORD_TOKEN", "discord"), ("PROFILE_API_TOKEN", "api")];

        let mut pairs = base.to_vec();
        pairs.push(("PROFILE_FOOTER_NOTE", " Ask in #help "));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.profiles.footer_note.as_deref(), Some("Ask in #help"));

        let mut pairs = base.to_vec();
        pairs.push(("PROFILE_FOOTER_NOTE", ""));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.profiles.footer_note, None);
    }

    #[test]
    fn missing_token_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[("DISCORD_TOKEN", "discord")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("PROFILE_API_TOKEN")));
    }

    #[test]
    fn bad_developer_id_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "discord"),
            ("PROFILE_API_TOKEN", "api"),
            ("DEVELOPER_IDS", "123,moe"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("moe"));
    }
}
