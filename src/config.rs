//! Application configuration loaded from environment variables.
//!
//! # Configuration Hierarchy
//!
//! All configuration is loaded from environment variables with sensible defaults
//! for development. In production, configure via environment variables or a `.env` file.
//!
//! # Storage
//!
//! - `STORE_BACKEND`: `memory` (default) or `sqlite`
//! - `DATABASE_PATH`: SQLite database file (default: `coffee.db`, `:memory:` allowed)
//! - `SEED_DATA`: Load the four starter coffees at startup (default: `true`)
//!
//! # Greeting and Droid
//!
//! - `GREETING_NAME`, `GREETING_COFFEE`: served by `/greeting` and `/greeting/coffee`.
//!   `GREETING_COFFEE` may reference the name with `${greeting.name}`.
//! - `DROID_ID`, `DROID_DESCRIPTION`: served by `/droid`

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Placeholder in `GREETING_COFFEE` replaced by the greeting name.
pub const GREETING_NAME_PLACEHOLDER: &str = "${greeting.name}";

/// Which [`CoffeeStore`](crate::store::CoffeeStore) implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-process list, lost on restart.
    Memory,
    /// SQLite table at `DATABASE_PATH`.
    Sqlite,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" | "mem" => Ok(StoreBackend::Memory),
            "sqlite" | "sql" | "db" => Ok(StoreBackend::Sqlite),
            other => Err(format!("unknown store backend '{other}' (expected memory or sqlite)")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => f.write_str("memory"),
            StoreBackend::Sqlite => f.write_str("sqlite"),
        }
    }
}

/// Values bound from the `greeting.*` properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingConfig {
    pub name: String,
    pub coffee: String,
}

/// Values bound from the `droid.*` properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroidConfig {
    pub id: String,
    pub description: String,
}

/// Application configuration loaded from environment variables.
///
/// # Example
///
/// ```rust,ignore
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.server_addr());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Server host address (default: "0.0.0.0")
    pub host: String,

    /// Server port (default: 8080)
    pub port: u16,

    /// Maximum request body size in bytes (default: 1MB)
    pub max_request_body_size: usize,

    /// Allowed CORS origins, `*` for any
    pub cors_allowed_origins: Vec<String>,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    pub store_backend: StoreBackend,

    /// SQLite database path, only used by the sqlite backend
    pub database_path: String,

    /// Whether the seed loader runs at startup
    pub seed_data: bool,

    // =========================================================================
    // Config-Derived Resources
    // =========================================================================
    pub greeting: GreetingConfig,

    pub droid: DroidConfig,

    // =========================================================================
    // Observability Configuration
    // =========================================================================
    /// Log level (e.g., "info", "debug", "trace")
    pub log_level: String,

    /// Port for Prometheus metrics endpoint (default: 9090, 0 = disabled)
    pub metrics_port: u16,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if any value fails to parse or the
    /// resulting configuration is inconsistent.
    pub fn from_env() -> AppResult<Self> {
        // Load an .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let greeting_name =
            env::var("GREETING_NAME").unwrap_or_else(|_| defaults.greeting.name.clone());
        let greeting_coffee = env::var("GREETING_COFFEE")
            .unwrap_or_else(|_| format!("{GREETING_NAME_PLACEHOLDER} is drinking Cafe Ganador"));

        let config = Self {
            // Server
            host: env::var("HOST").unwrap_or(defaults.host),
            port: Self::parse_env("PORT", defaults.port)?,
            max_request_body_size: Self::parse_env(
                "MAX_REQUEST_BODY_SIZE",
                defaults.max_request_body_size,
            )?,
            cors_allowed_origins: Self::parse_cors_origins(),

            // Storage
            store_backend: Self::parse_env("STORE_BACKEND", defaults.store_backend)?,
            database_path: env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            seed_data: Self::parse_env("SEED_DATA", defaults.seed_data)?,

            // Config-derived resources
            greeting: GreetingConfig {
                coffee: expand_greeting_name(&greeting_coffee, &greeting_name),
                name: greeting_name,
            },
            droid: DroidConfig {
                id: env::var("DROID_ID").unwrap_or(defaults.droid.id),
                description: env::var("DROID_DESCRIPTION").unwrap_or(defaults.droid.description),
            },

            // Observability
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
            metrics_port: Self::parse_env("METRICS_PORT", defaults.metrics_port)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values for consistency and correctness.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ConfigError` if validation fails.
    pub fn validate(&self) -> AppResult<()> {
        if self.max_request_body_size == 0 {
            return Err(AppError::ConfigError(
                "MAX_REQUEST_BODY_SIZE must be greater than 0".to_string(),
            ));
        }

        if self.store_backend == StoreBackend::Sqlite && self.database_path.trim().is_empty() {
            return Err(AppError::ConfigError(
                "DATABASE_PATH must be set when STORE_BACKEND=sqlite".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the full server address for binding.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if Prometheus metrics export is enabled.
    pub fn metrics_enabled(&self) -> bool {
        self.metrics_port > 0
    }

    /// Get the metrics endpoint address.
    ///
    /// Returns `None` if metrics are disabled (port = 0).
    pub fn metrics_addr(&self) -> Option<std::net::SocketAddr> {
        self.metrics_enabled()
            .then(|| std::net::SocketAddr::from(([0, 0, 0, 0], self.metrics_port)))
    }

    /// Parse an environment variable into the specified type with a default value.
    fn parse_env<T>(name: &str, default: T) -> AppResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match env::var(name) {
            Ok(val) => val
                .trim()
                .parse()
                .map_err(|e| AppError::ConfigError(format!("Invalid {name}: {e}"))),
            Err(_) => Ok(default),
        }
    }

    /// Parse CORS allowed origins from environment variable.
    fn parse_cors_origins() -> Vec<String> {
        env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Expand `${greeting.name}` references in a greeting template.
pub fn expand_greeting_name(template: &str, name: &str) -> String {
    template.replace(GREETING_NAME_PLACEHOLDER, name)
}

/// Default configuration for testing and development.
///
/// Production deployments should use `Config::from_env()` instead.
impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_request_body_size: 1024 * 1024, // 1MB
            cors_allowed_origins: vec!["*".to_string()],
            store_backend: StoreBackend::Memory,
            database_path: "coffee.db".to_string(),
            seed_data: true,
            greeting: GreetingConfig {
                name: "Dakota".to_string(),
                coffee: "Dakota is drinking Cafe Ganador".to_string(),
            },
            droid: DroidConfig {
                id: "BB-8".to_string(),
                description: "Small, rolling android. Probably doesn't drink coffee.".to_string(),
            },
            log_level: "info".to_string(),
            metrics_port: 9090,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert!(config.seed_data);
        assert_eq!(config.greeting.name, "Dakota");
        assert_eq!(config.droid.id, "BB-8");
    }

    #[test]
    fn test_server_addr_format() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..Config::default()
        };

        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert_eq!(" SQLite ".parse::<StoreBackend>(), Ok(StoreBackend::Sqlite));
        assert!("redis".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_store_backend_display() {
        assert_eq!(StoreBackend::Memory.to_string(), "memory");
        assert_eq!(StoreBackend::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn test_expand_greeting_name() {
        assert_eq!(
            expand_greeting_name("${greeting.name} is drinking Cafe Ganador", "Dakota"),
            "Dakota is drinking Cafe Ganador"
        );
        assert_eq!(expand_greeting_name("plain text", "Dakota"), "plain text");
    }

    #[test]
    fn test_metrics_addr_disabled() {
        let config = Config {
            metrics_port: 0,
            ..Config::default()
        };
        assert!(config.metrics_addr().is_none());
    }

    #[test]
    fn test_validate_zero_body_limit() {
        let config = Config {
            max_request_body_size: 0,
            ..Config::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("MAX_REQUEST_BODY_SIZE"));
    }

    #[test]
    fn test_validate_sqlite_requires_path() {
        let config = Config {
            store_backend: StoreBackend::Sqlite,
            database_path: "  ".to_string(),
            ..Config::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("DATABASE_PATH"));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }
}
