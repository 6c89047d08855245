use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use scorer_domain::{DbConfig, RuntimeConfig, ScoringConfig};

use super::validation::{validate_clickhouse_url, validate_database_name};

pub const CONFIG_PATH_ENV: &str = "SCORER_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub recompute_enabled: bool,
    pub recompute_interval_minutes: u64,
    pub batch_concurrency: usize,
    pub batch_limit: usize,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub scoring: ScoringConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            clickhouse_url: "http://127.0.0.1:8123".to_string(),
            clickhouse_database: "wallet_scores".to_string(),
            clickhouse_user: None,
            clickhouse_password: None,
            recompute_enabled: true,
            recompute_interval_minutes: 60,
            batch_concurrency: 8,
            batch_limit: 10_000,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            scoring: ScoringConfig::default(),
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            Self::from_toml(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|err| anyhow!("invalid config: {}", err))
    }

    pub fn normalize(&mut self) {
        for value in [
            &mut self.api_token,
            &mut self.clickhouse_user,
            &mut self.clickhouse_password,
        ] {
            if value.as_deref().map(str::trim).is_some_and(str::is_empty) {
                *value = None;
            }
        }
        self.clickhouse_url = self.clickhouse_url.trim().trim_end_matches('/').to_string();
        self.clickhouse_database = self.clickhouse_database.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_clickhouse_url(&self.clickhouse_url)?;
        validate_database_name(&self.clickhouse_database)?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.recompute_interval_minutes == 0 {
            return Err(anyhow!("recompute_interval_minutes must be greater than 0"));
        }
        if self.batch_concurrency == 0 {
            return Err(anyhow!("batch_concurrency must be greater than 0"));
        }
        if self.batch_limit == 0 {
            return Err(anyhow!("batch_limit must be greater than 0"));
        }
        self.scoring.validate().map_err(|err| anyhow!(err))?;
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            recompute_enabled: self.recompute_enabled,
            recompute_interval_minutes: self.recompute_interval_minutes,
            batch_concurrency: self.batch_concurrency,
            batch_limit: self.batch_limit,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            clickhouse_url: self.clickhouse_url.clone(),
            clickhouse_database: self.clickhouse_database.clone(),
            clickhouse_user: self.clickhouse_user.clone(),
            clickhouse_password: self.clickhouse_password.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("SCORER_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("SCORER_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("SCORER_CLICKHOUSE_URL") {
            self.clickhouse_url = value;
        }
        if let Ok(value) = env::var("SCORER_CLICKHOUSE_DATABASE") {
            self.clickhouse_database = value;
        }
        if let Ok(value) = env::var("SCORER_CLICKHOUSE_USER") {
            self.clickhouse_user = Some(value);
        }
        if let Ok(value) = env::var("SCORER_CLICKHOUSE_PASSWORD") {
            self.clickhouse_password = Some(value);
        }
        if let Ok(value) = env::var("SCORER_RECOMPUTE_ENABLED") {
            self.recompute_enabled = value.parse().unwrap_or(self.recompute_enabled);
        }
        if let Ok(value) = env::var("SCORER_RECOMPUTE_INTERVAL_MINUTES") {
            self.recompute_interval_minutes =
                value.parse().unwrap_or(self.recompute_interval_minutes);
        }
        if let Ok(value) = env::var("SCORER_BATCH_CONCURRENCY") {
            self.batch_concurrency = value.parse().unwrap_or(self.batch_concurrency);
        }
        if let Ok(value) = env::var("SCORER_BATCH_LIMIT") {
            self.batch_limit = value.parse().unwrap_or(self.batch_limit);
        }
        if let Ok(value) = env::var("SCORER_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("SCORER_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}
