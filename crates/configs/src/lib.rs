use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub items: ItemsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3000, worker_threads: Some(4) }
    }
}

/// Item router settings: mount prefix and whether the store starts with sample data.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ItemsConfig {
    pub prefix: String,
    pub seed: bool,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self { prefix: "/items".into(), seed: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `compact` or `json`
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { format: "compact".into() }
    }
}

impl LogConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file at `CONFIG_PATH` (default `config.toml`). Only a missing
    /// default file falls back to defaults overlaid with `SERVER_HOST`,
    /// `SERVER_PORT` and `TOKIO_WORKER_THREADS`.
    pub fn load_and_validate() -> Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let mut cfg = match std::env::var("CONFIG_PATH") {
            Ok(path) => Self::load_from_path_or_env(&path, true, env)?,
            Err(_) => Self::load_from_path_or_env(DEFAULT_CONFIG_PATH, false, env)?,
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// `explicit` marks a path the operator named; such a path must exist.
    /// Parse errors always propagate.
    pub fn load_from_path_or_env<F>(path: &str, explicit: bool, get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match load_from_file(path) {
            Ok(cfg) => Ok(cfg),
            Err(e) if !explicit && is_not_found(&e) => Ok(Self::from_env_with(get)),
            Err(e) => Err(e.context(format!("cannot load config from {path}"))),
        }
    }

    pub fn from_env_with<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(host) = get("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = get("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = get("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.items.normalize()?;
        self.log.validate()?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl ItemsConfig {
    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.prefix.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(anyhow!("items.prefix must not be empty or '/'"));
        }
        if !trimmed.starts_with('/') {
            return Err(anyhow!("items.prefix must start with '/'"));
        }
        self.prefix = trimmed.to_string();
        Ok(())
    }
}

impl LogConfig {
    fn validate(&self) -> Result<()> {
        let f = self.format.to_ascii_lowercase();
        if f != "compact" && f != "json" {
            return Err(anyhow!("log.format must be 'compact' or 'json', got '{}'", self.format));
        }
        Ok(())
    }
}
