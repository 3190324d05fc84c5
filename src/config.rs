// src/config.rs
use std::{net::SocketAddr, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_MAX_TURNS: usize = crate::services::session::DEFAULT_MAX_TURNS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GOOGLE_API_KEY is not set")]
    MissingApiKey,
    #[error("invalid ASKAI_BIND address '{value}': {source}")]
    InvalidBind {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid ASKAI_MAX_TURNS '{value}': {source}")]
    InvalidMaxTurns {
        value: String,
        source: std::num::ParseIntError,
    },
}

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub bind: SocketAddr,
    pub public_dir: PathBuf,
    pub max_turns: usize,
}

// Keep the key out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("bind", &self.bind)
            .field("public_dir", &self.public_dir)
            .field("max_turns", &self.max_turns)
            .finish()
    }
}

impl Config {
    /// Read `.env` when present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = non_blank("GOOGLE_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let bind_raw = non_blank("ASKAI_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse()
            .map_err(|source| ConfigError::InvalidBind { value: bind_raw.clone(), source })?;

        let max_turns = match non_blank("ASKAI_MAX_TURNS") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|source| ConfigError::InvalidMaxTurns { value: raw.clone(), source })?,
            None => DEFAULT_MAX_TURNS,
        };

        Ok(Self {
            api_key,
            model: non_blank("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_blank("GEMINI_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            bind,
            public_dir: non_blank("ASKAI_PUBLIC_DIR")
                .unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string())
                .into(),
            max_turns,
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.max_turns, DEFAULT_MAX_TURNS);
    }

    #[test]
    fn missing_or_blank_key_is_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::MissingApiKey)
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "   ")])),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "abc"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("GEMINI_API_BASE", "http://localhost:9999/v1beta/"),
            ("ASKAI_BIND", "0.0.0.0:8080"),
            ("ASKAI_MAX_TURNS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.max_turns, 0);
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.api_base, "http://localhost:9999/v1beta");
        assert_eq!(config.bind.port(), 8080);
    }

    #[test]
    fn bad_bind_address_is_reported() {
        let err = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "abc"),
            ("ASKAI_BIND", "not-an-address"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("not-an-address"));
    }

    #[test]
    fn bad_turn_cap_is_reported() {
        let err = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "abc"),
            ("ASKAI_MAX_TURNS", "-3"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxTurns { .. }));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let config = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "super-secret")])).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
