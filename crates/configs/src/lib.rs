use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8001, worker_threads: Some(4) }
    }
}

/// Which persistence backend a `database.url` points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    /// Postgres schema holding the collections.
    #[serde(default = "default_db_name")]
    pub name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            name: default_db_name(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_db_name() -> String { "gmb_travels".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,
    #[serde(default = "default_admin_username")]
    pub admin_username: String,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default)]
    pub seed_demo_team: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_minutes: default_token_ttl(),
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
            admin_email: default_admin_email(),
            seed_demo_team: false,
        }
    }
}

fn default_token_ttl() -> i64 { 60 }
fn default_admin_username() -> String { "admin".into() }
fn default_admin_password() -> String { DEFAULT_ADMIN_PASSWORD.into() }
fn default_admin_email() -> String { "admin@gmbtravelskashmir.com".into() }

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,
    /// Public URL prefix the upload directory is served under.
    #[serde(default = "default_upload_prefix")]
    pub url_prefix: String,
    #[serde(default = "default_upload_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { dir: default_upload_dir(), url_prefix: default_upload_prefix(), max_bytes: default_upload_max_bytes() }
    }
}

fn default_upload_dir() -> PathBuf { PathBuf::from("uploads") }
fn default_upload_prefix() -> String { "/uploads".into() }
fn default_upload_max_bytes() -> usize { 20 * 1024 * 1024 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present (defaults otherwise), then environment overrides, then validation.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from an environment lookup. Taking the lookup as a closure keeps tests hermetic.
    pub fn apply_env<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get("SERVER_HOST") { self.server.host = v; }
        if let Some(p) = get("SERVER_PORT").and_then(|v| v.parse::<u16>().ok()) { self.server.port = p; }
        if let Some(w) = get("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(url) = get("DATABASE_URL").or_else(|| get("MONGO_URL")) { self.database.url = url; }
        if let Some(name) = get("DB_NAME") { self.database.name = name; }
        if let Some(secret) = get("JWT_SECRET") { self.auth.jwt_secret = secret; }
        if let Some(ttl) = get("TOKEN_TTL_MINUTES").and_then(|v| v.parse::<i64>().ok()) {
            self.auth.token_ttl_minutes = ttl;
        }
        if let Some(u) = get("ADMIN_USERNAME") { self.auth.admin_username = u; }
        if let Some(p) = get("ADMIN_PASSWORD") { self.auth.admin_password = p; }
        if let Some(e) = get("ADMIN_EMAIL") { self.auth.admin_email = e; }
        if let Some(dir) = get("UPLOAD_DIR") { self.uploads.dir = PathBuf::from(dir); }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize();
        self.database.validate()?;
        self.auth.normalize_and_validate()?;
        self.uploads.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    fn normalize(&mut self) {
        // 未配置时退回内存存储，方便本地开发
        if self.url.trim().is_empty() {
            self.url = "memory://".to_string();
        }
        if self.name.trim().is_empty() {
            self.name = default_db_name();
        }
    }

    /// Classify the URL scheme.
    pub fn backend(&self) -> Result<StoreBackend> {
        let url = self.url.trim();
        let lower = url.to_lowercase();
        if lower.starts_with("postgresql://") || lower.starts_with("postgres://") {
            Ok(StoreBackend::Postgres)
        } else if lower.starts_with("memory://") {
            Ok(StoreBackend::Memory)
        } else if let Some(path) = url.strip_prefix("file://") {
            if path.is_empty() {
                return Err(anyhow!("database.url file:// needs a path"));
            }
            Ok(StoreBackend::File(PathBuf::from(path)))
        } else {
            Err(anyhow!("database.url must start with postgres://, postgresql://, memory:// or file://"))
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        self.backend()?;
        if !self.name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(anyhow!("database.name may only contain ASCII letters, digits and '_'"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    fn normalize_and_validate(&mut self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            self.jwt_secret = DEV_JWT_SECRET.to_string();
        }
        if self.token_ttl_minutes <= 0 {
            return Err(anyhow!("auth.token_ttl_minutes must be positive"));
        }
        if self.admin_username.trim().is_empty() || self.admin_password.is_empty() {
            return Err(anyhow!("auth.admin_username and auth.admin_password are required"));
        }
        Ok(())
    }

    pub fn uses_dev_secret(&self) -> bool { self.jwt_secret == DEV_JWT_SECRET }

    pub fn uses_default_admin_password(&self) -> bool { self.admin_password == DEFAULT_ADMIN_PASSWORD }
}

impl UploadConfig {
    fn validate(&self) -> Result<()> {
        if self.dir.as_os_str().is_empty() {
            return Err(anyhow!("uploads.dir is empty"));
        }
        if !self.url_prefix.starts_with('/') || self.url_prefix.trim_end_matches('/').is_empty() {
            return Err(anyhow!("uploads.url_prefix must start with '/' and name a path below the root"));
        }
        if self.max_bytes == 0 {
            return Err(anyhow!("uploads.max_bytes must be positive"));
        }
        Ok(())
    }
}
