//! Daemon settings.
//!
//! `servicecore.toml` in the working directory is read first; a missing file
//! leaves the built-in defaults in place. `SERVICECORE_*` variables then
//! override individual keys, and `RUST_LOG` wins over everything for logging.
//!
//! | variable                   | key               |
//! |----------------------------|-------------------|
//! | `SERVICECORE_HOST`         | `server.host`     |
//! | `SERVICECORE_PORT`         | `server.port`     |
//! | `SERVICECORE_BIND`         | `host:port` pair  |
//! | `SERVICECORE_DATABASE_URL` | `database.url`    |
//! | `SERVICECORE_LOG`          | `logging.filter`  |
//! | `SERVICECORE_CORS`         | `cors.enabled`    |

use serde::Deserialize;

const FILE_NAME: &str = "servicecore.toml";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3003;
const DEFAULT_DATABASE_URL: &str = "sqlite:servicecore.db?mode=rwc";
const DEFAULT_LOG_FILTER: &str = "servicecored=info,servicecore=info,tower_http=debug";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// `sqlx` connection string, e.g. `sqlite::memory:`.
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Serve a permissive CORS policy to browser clients.
    pub enabled: bool,
}

impl Config {
    /// Read the settings file, apply process environment overrides and check
    /// the result.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or when the merged
    /// settings are unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(FILE_NAME)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        let replace = |key: &str, slot: &mut String| {
            if let Some(value) = var(key) {
                *slot = value;
            }
        };
        replace("SERVICECORE_HOST", &mut self.server.host);
        replace("SERVICECORE_DATABASE_URL", &mut self.database.url);
        replace("SERVICECORE_LOG", &mut self.logging.filter);
        replace("RUST_LOG", &mut self.logging.filter);

        if let Some(port) = var("SERVICECORE_PORT").and_then(|raw| raw.parse().ok()) {
            self.server.port = port;
        }
        if let Some(bind) = var("SERVICECORE_BIND")
            && let Some((host, port)) = bind.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(enabled) = var("SERVICECORE_CORS").as_deref().and_then(parse_flag) {
            self.cors.enabled = enabled;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if !self.database.url.starts_with("sqlite:") {
            return Err(ConfigError::Validation(format!(
                "database url `{}` is not a sqlite url",
                self.database.url
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed servicecore.toml")]
    Parse(#[from] toml::de::Error),
    #[error("cannot read servicecore.toml")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
