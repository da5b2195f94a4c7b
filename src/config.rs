use std::env;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_host: String,
    pub redis_port: u16,
    pub redis_username: Option<String>,
    pub redis_password: Option<String>,
    pub redis_db: i64,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let redis_host = env::var("REDIS_HOST")
            .unwrap_or_else(|_| "localhost".to_string());

        let redis_port = env::var("REDIS_PORT")
            .unwrap_or_else(|_| "6379".to_string())
            .parse::<u16>()
            .context("REDIS_PORT must be a valid port number (0-65535)")?;

        let redis_username = env::var("REDIS_USERNAME").ok();
        let redis_password = env::var("REDIS_PASSWORD").ok();

        let redis_db = env::var("REDIS_DB")
            .unwrap_or_else(|_| "0".to_string())
            .parse::<i64>()
            .context("REDIS_DB must be a valid database index")?;

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            redis_host,
            redis_port,
            redis_username,
            redis_password,
            redis_db,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Redis host: {}:{}", self.redis_host, self.redis_port);
        tracing::info!("  Redis database: {}", self.redis_db);
        tracing::info!("  Redis username: {}",
            self.redis_username.as_deref().unwrap_or("(none)"));
        tracing::info!("  Redis password: {}",
            if self.redis_password.is_some() { "(set)" } else { "(none)" });
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}
