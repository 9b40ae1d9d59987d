use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub autosave: AutosaveConfig,
    #[serde(default)]
    pub cleanup: CleanupConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Draft autosave tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct AutosaveConfig {
    /// Quiet period between the last form mutation and the persisted write.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Consecutive save failures before the editor reports degraded saving.
    #[serde(default = "default_failure_warning_threshold")]
    pub failure_warning_threshold: u32,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            failure_warning_threshold: default_failure_warning_threshold(),
        }
    }
}

/// Background cleanup of orphaned/abandoned draft rows.
#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    #[serde(default = "default_sweep_interval_minutes")]
    pub sweep_interval_minutes: u64,

    #[serde(default = "default_stale_draft_hours")]
    pub stale_draft_hours: i64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            sweep_interval_minutes: default_sweep_interval_minutes(),
            stale_draft_hours: default_stale_draft_hours(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_debounce_ms() -> u64 {
    2000
}
fn default_failure_warning_threshold() -> u32 {
    3
}
fn default_sweep_interval_minutes() -> u64 {
    60
}
fn default_stale_draft_hours() -> i64 {
    72
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with IM__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("IM").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .expect("Invalid server host/port configuration")
    }

    pub fn database_config(&self) -> persistence::db::DatabaseConfig {
        persistence::db::DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.min_connections,
            connect_timeout_secs: self.database.connect_timeout_secs,
            idle_timeout_secs: self.database.idle_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config() -> Config {
        let raw = r#"
            [server]

            [database]
            url = "postgres://localhost/inspection_test"

            [logging]
        "#;
        let config = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap();
        config.try_deserialize().unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = minimal_config();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.autosave.debounce_ms, 2000);
        assert_eq!(config.autosave.failure_warning_threshold, 3);
        assert_eq!(config.cleanup.sweep_interval_minutes, 60);
        assert_eq!(config.cleanup.stale_draft_hours, 72);
        assert!(config.security.cors_origins.is_empty());
    }

    #[test]
    fn test_socket_addr() {
        let config = minimal_config();
        assert_eq!(config.socket_addr().port(), 8080);
    }

    #[test]
    fn test_database_config_conversion() {
        let config = minimal_config();
        let db = config.database_config();
        assert_eq!(db.url, "postgres://localhost/inspection_test");
        assert_eq!(db.max_connections, 20);
    }
}
