use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

/// Settings for the shared-data store and its public links.
#[derive(Debug, Clone, Deserialize)]
pub struct ShareConfig {
    /// Public origin used when composing links; empty means relative links.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Read-only database shipped with the deployment, copied into `db_path` on first boot.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
    #[serde(default = "default_id_length")]
    pub id_length: usize,
    #[serde(default = "default_max_id_attempts")]
    pub max_id_attempts: u32,
    #[serde(default = "default_op_timeout")]
    pub op_timeout_secs: u64,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            db_path: default_db_path(),
            seed_path: None,
            id_length: default_id_length(),
            max_id_attempts: default_max_id_attempts(),
            op_timeout_secs: default_op_timeout(),
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 3001 }
fn default_db_path() -> PathBuf { PathBuf::from("data/shared.db") }
fn default_id_length() -> usize { 10 }
fn default_max_id_attempts() -> u32 { 3 }
fn default_op_timeout() -> u64 { 5 }
fn default_max_connections() -> u32 { 1 }

/// Load `config.toml` (or `CONFIG_PATH`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok());
        self.server.normalize()?;
        self.share.normalize();
        self.share.validate()?;
        Ok(())
    }

    /// Overlay environment-style values on top of file values.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        // SERVER_PORT wins over the generic PORT used by most hosting platforms
        if let Some(port) = lookup("SERVER_PORT").or_else(|| lookup("PORT")).and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(url) = lookup("BASE_URL") {
            self.share.base_url = url;
        }
        if let Some(path) = lookup("SHARE_DB_PATH").filter(|p| !p.trim().is_empty()) {
            self.share.db_path = PathBuf::from(path);
        }
        if let Some(seed) = lookup("SHARE_SEED_PATH").filter(|p| !p.trim().is_empty()) {
            self.share.seed_path = Some(PathBuf::from(seed));
        }
        if let Some(threads) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse().ok()) {
            self.server.worker_threads = Some(threads);
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.json = format.eq_ignore_ascii_case("json");
        }
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl ShareConfig {
    pub fn normalize(&mut self) {
        let trimmed = self.base_url.trim().trim_end_matches('/').to_string();
        self.base_url = trimmed;
    }

    pub fn validate(&self) -> Result<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(anyhow!("share.db_path is empty; set it in config.toml or SHARE_DB_PATH"));
        }
        if !self.base_url.is_empty()
            && !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
        {
            return Err(anyhow!("share.base_url must start with http:// or https://"));
        }
        if !(6..=64).contains(&self.id_length) {
            return Err(anyhow!("share.id_length must be within 6..=64"));
        }
        if self.max_id_attempts == 0 {
            return Err(anyhow!("share.max_id_attempts must be >= 1"));
        }
        if self.op_timeout_secs == 0 {
            return Err(anyhow!("share.op_timeout_secs must be a positive number of seconds"));
        }
        if self.max_connections == 0 {
            return Err(anyhow!("share.max_connections must be >= 1"));
        }
        Ok(())
    }
}
