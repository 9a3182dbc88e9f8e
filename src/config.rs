use sqlx::mysql::MySqlConnectOptions;
use std::str::FromStr;
use thiserror::Error;

use crate::driver::CredentialHasher;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the MySQL database
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

/// Process configuration, read once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub database: DatabaseConfig,
    /// scrypt work factor for new digests; `None` keeps the recommended one
    pub scrypt_log_n: Option<u8>,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if there is one
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let database = DatabaseConfig {
            host: required("HOST")?,
            port: parse_or(&lookup, "DB_PORT", DEFAULT_DB_PORT)?,
            user: required("USER")?,
            password: lookup("PASSWORD").unwrap_or_default(),
            name: required("DB_NAME")?,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        };

        let scrypt_log_n = match lookup("SCRYPT_LOG_N") {
            Some(value) => Some(parse("SCRYPT_LOG_N", value)?),
            None => None,
        };

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            database,
            scrypt_log_n,
        })
    }

    pub fn hasher(&self) -> Result<CredentialHasher, ConfigError> {
        match self.scrypt_log_n {
            None => Ok(CredentialHasher::default()),
            Some(log_n) => {
                CredentialHasher::with_cost(log_n).map_err(|_| ConfigError::Invalid {
                    name: "SCRYPT_LOG_N",
                    value: log_n.to_string(),
                })
            }
        }
    }
}

fn parse<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

fn parse_or<T, F>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => parse(name, value),
        _ => Ok(default),
    }
}
