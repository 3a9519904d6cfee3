//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{DEFAULT_INVITE_TTL_DAYS, MAX_INVITE_TTL_DAYS};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub invite: InviteSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InviteSettings {
    pub default_ttl_days: i64,
    pub max_ttl_days: i64,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.name", "office-core")?
            .set_default("database.url", "postgres://localhost/office")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("invite.default_ttl_days", DEFAULT_INVITE_TTL_DAYS)?
            .set_default("invite.max_ttl_days", MAX_INVITE_TTL_DAYS)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_falls_back_to_defaults() {
        let config = AppConfig::load().expect("defaults should deserialize");
        assert_eq!(config.invite.default_ttl_days, DEFAULT_INVITE_TTL_DAYS);
        assert_eq!(config.invite.max_ttl_days, MAX_INVITE_TTL_DAYS);
        assert!(config.database.max_connections >= config.database.min_connections);
    }
}
