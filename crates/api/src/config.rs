//! Environment-sourced configuration.
//!
//! Every setting falls back to a fixed default when its variable is unset,
//! so the service comes up with no environment at all in a stock
//! docker-compose deployment.

use std::env;

use tracing::info;

/// Service configuration: database coordinates plus the listen port.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_username: String,
    pub db_password: String,
    pub db_name: String,
    pub db_host: String,
    pub db_port: String,
    pub listen_port: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            db_username: env_or("COOKBOOK_DB_USERNAME", "backend_db_client"),
            db_password: env_or("COOKBOOK_DB_PASSWORD", "proneraggedyplanetgallows"),
            db_name: env_or("COOKBOOK_DATABASE", "cookbook"),
            db_host: env_or("COOKBOOK_DB_HOST", "cookbookDB"),
            db_port: env_or("COOKBOOK_DB_PORT", "5432"),
            listen_port: env_or("COOKBOOK_PORT", "8085"),
        }
    }

    /// Postgres connection URL for the store.
    pub fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.db_username, self.db_password, self.db_host, self.db_port, self.db_name
        )
    }

    /// Address the HTTP listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.listen_port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default");
        default.to_string()
    })
}
