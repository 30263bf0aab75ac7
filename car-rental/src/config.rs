//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: `CAR_RENTAL_`, nested keys separated by `__`)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/car-rental/config.toml
//! 4. System directory: /etc/car-rental/config.toml
//! 5. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::auth::PasswordConfig;
use crate::error::Result;
use crate::session::SessionConfig;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "CAR_RENTAL_";

/// Page size used when the configured value is missing or unusable
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session and anti-forgery configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// List page parameters
    #[serde(default)]
    pub parameters: ParametersConfig,

    /// Roles and administrator account created at startup
    #[serde(default)]
    pub seed: SeedConfig,

    /// Password hashing parameters
    #[serde(default)]
    pub password: PasswordConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request body size limit in MB
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// Enable response compression
    #[serde(default = "default_true")]
    pub compression: bool,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            compression: true,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL (`sqlite://path/to/file.db` or `sqlite::memory:`)
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum idle connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,

    /// Maximum retry attempts for establishing database connection
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retry attempts in seconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,

    /// Apply embedded migrations at startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout_secs: default_connection_timeout(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay(),
            run_migrations: true,
        }
    }
}

/// List page parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametersConfig {
    /// Rows per list page
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl ParametersConfig {
    /// Page size actually used by list pages.
    ///
    /// Non-positive values fall back to [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn effective_page_size(&self) -> i64 {
        if self.page_size > 0 {
            self.page_size
        } else {
            DEFAULT_PAGE_SIZE
        }
    }
}

/// Startup seeding of roles and the administrator account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Roles that must exist
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,

    /// Administrator user name
    #[serde(default = "default_admin_user_name")]
    pub admin_user_name: String,

    /// Administrator e-mail, used to detect an existing administrator
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Administrator password; no administrator is created when unset
    #[serde(default)]
    pub admin_password: Option<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            roles: default_roles(),
            admin_user_name: default_admin_user_name(),
            admin_email: default_admin_email(),
            admin_password: None,
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_body_limit_mb() -> usize {
    2
}

fn default_true() -> bool {
    true
}

fn default_database_url() -> String {
    "sqlite://car_rental.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_roles() -> Vec<String> {
    vec!["Admin".to_string(), "User".to_string()]
}

fn default_admin_user_name() -> String {
    "admin".to_string()
}

fn default_admin_email() -> String {
    "admin@car-rental.local".to_string()
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Searches for config files in this order (first found wins):
    /// 1. Current working directory: ./config.toml
    /// 2. XDG config directory: ~/.config/car-rental/config.toml
    /// 3. System directory: /etc/car-rental/config.toml
    ///
    /// Environment variables (`CAR_RENTAL_` prefix) override all file-based configs.
    pub fn load() -> Result<Self> {
        let config_paths = Self::find_config_paths();

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so that higher priority files override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Bypasses the search path. Environment variables still apply.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }

    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix("car-rental");
        if let Some(path) = xdg_dirs.find_config_file("config.toml") {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc/car-rental/config.toml"));
        paths
    }

    /// Rows per list page
    #[must_use]
    pub fn page_size(&self) -> i64 {
        self.parameters.effective_page_size()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "car-rental".to_string(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
                environment: default_environment(),
            },
            middleware: MiddlewareConfig::default(),
            database: DatabaseConfig::default(),
            session: SessionConfig::default(),
            parameters: ParametersConfig::default(),
            seed: SeedConfig::default(),
            password: PasswordConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.page_size(), 20);
        assert_eq!(config.seed.roles, vec!["Admin", "User"]);
        assert!(config.seed.admin_password.is_none());
    }

    #[test]
    fn test_non_positive_page_size_falls_back() {
        let params = ParametersConfig { page_size: 0 };
        assert_eq!(params.effective_page_size(), DEFAULT_PAGE_SIZE);

        let params = ParametersConfig { page_size: -5 };
        assert_eq!(params.effective_page_size(), DEFAULT_PAGE_SIZE);

        let params = ParametersConfig { page_size: 7 };
        assert_eq!(params.effective_page_size(), 7);
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[service]
name = "fleet-admin"
port = 9090

[parameters]
page_size = 5

[database]
url = "sqlite::memory:"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.service.name, "fleet-admin");
        assert_eq!(config.service.port, 9090);
        assert_eq!(config.page_size(), 5);
        assert_eq!(config.database.url, "sqlite::memory:");
        // untouched sections keep their defaults
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.session.cookie_name, ".CarRental.Session");
    }

    #[test]
    fn test_example_config_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.toml");
        let config = Config::load_from(path).unwrap();
        assert_eq!(config.service.name, "car-rental");
        assert!(config.session.csrf.enabled);
        assert_eq!(config.password.min_password_length, 6);
    }
}
