//! Environment profiles and their settings, selected by `APP_ENV`.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const KNOWN_PROFILES: &str = "local, development, production";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Local,
    Development,
    Production,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Local => "local",
            Profile::Development => "development",
            Profile::Production => "production",
        }
    }
}

impl FromStr for Profile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Profile::Local),
            "development" => Ok(Profile::Development),
            "production" => Ok(Profile::Production),
            other => Err(ConfigError::UnknownProfile {
                given: other.to_string(),
                known: KNOWN_PROFILES,
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub profile: Profile,
    pub database_url: String,
    pub secret_key: String,
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Profile from `APP_ENV` (default `local`), settings from the
    /// profile-specific variables. Binaries load `.env` before calling this.
    pub fn from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_ENV")
            .unwrap_or_else(|_| "local".into())
            .parse()?;
        Self::for_profile(profile)
    }

    pub fn for_profile(profile: Profile) -> Result<Self, ConfigError> {
        let (database_url, secret_key) = match profile {
            // Fixed settings so a checkout runs with no environment at all.
            Profile::Local => ("sqlite://dev.sqlite3".into(), "testjwtsecret123".into()),
            Profile::Development | Profile::Production => {
                (require("APP_DATABASE_URL")?, require("APP_SECRET_KEY")?)
            }
        };
        let listen_addr =
            std::env::var("APP_LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.into());
        let listen_addr = listen_addr
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddr(listen_addr))?;
        Ok(Self {
            profile,
            database_url,
            secret_key,
            listen_addr,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parses_case_insensitively() {
        assert_eq!("LOCAL".parse::<Profile>().unwrap(), Profile::Local);
        assert_eq!(
            "development".parse::<Profile>().unwrap(),
            Profile::Development
        );
        assert_eq!("Production".parse::<Profile>().unwrap(), Profile::Production);
    }

    #[test]
    fn unknown_profile_names_the_alternatives() {
        let err = "staging".parse::<Profile>().unwrap_err();
        assert!(err.to_string().contains(KNOWN_PROFILES));
    }

    #[test]
    fn local_profile_needs_no_environment() {
        let cfg = Config::for_profile(Profile::Local).unwrap();
        assert_eq!(cfg.profile, Profile::Local);
        assert_eq!(cfg.database_url, "sqlite://dev.sqlite3");
    }
}
