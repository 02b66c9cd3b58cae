//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration files (config/default.toml, config/local.toml)
//! 3. Environment variables (GATEHOUSE__*)
//!
//! The backend URL is the exception: it comes from `BACKEND_URL` and nowhere else.

use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;
use url::Url;

/// Environment variable naming the backend auth service
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub cookie: CookieConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Port number (e.g., 5000)
    pub port: u16,
}

impl ServerConfig {
    /// Address the listener binds to, as "host:port"
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Backend auth service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g., "http://127.0.0.1:3000")
    pub url: Url,
    /// Per-call timeout in milliseconds (default: 3000)
    pub timeout_ms: u64,
}

impl BackendConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    /// Mark the session cookie `Secure` (only sent over https)
    pub secure: bool,
    /// Session cookie max age in seconds (default: 604800 = 7 days)
    pub max_age_seconds: i64,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (GATEHOUSE__*)
    ///
    /// `backend.url` is taken from `BACKEND_URL` only. No other source can
    /// supply it.
    ///
    /// # Errors
    /// Returns error if `BACKEND_URL` is missing or blank, or any value is invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        let backend_url = std::env::var(BACKEND_URL_ENV).unwrap_or_default();
        if backend_url.trim().is_empty() {
            return Err(missing_backend_url());
        }

        let builder = defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("GATEHOUSE")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::from_sources(builder, &backend_url)
    }

    /// Build the final configuration from `builder`, with `backend_url`
    /// overriding whatever the sources say about `backend.url`.
    fn from_sources(
        builder: ConfigBuilder<DefaultState>,
        backend_url: &str,
    ) -> Result<Self, crate::error::AppError> {
        if backend_url.trim().is_empty() {
            return Err(missing_backend_url());
        }

        let app_config: Self = builder
            .set_override("backend.url", backend_url.trim())?
            .build()?
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), crate::error::AppError> {
        let scheme = self.backend.url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(crate::error::AppError::Config(format!(
                "backend.url must be an http or https URL, got scheme {scheme:?}"
            )));
        }

        if self.backend.timeout_ms == 0 {
            return Err(crate::error::AppError::Config(
                "backend.timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.cookie.max_age_seconds <= 0 {
            return Err(crate::error::AppError::Config(
                "cookie.max_age_seconds must be greater than 0".to_string(),
            ));
        }

        if !self.cookie.secure {
            tracing::warn!(
                "Session cookies are not marked Secure; only serve this over a trusted network"
            );
        }

        Ok(())
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5000)?
        .set_default("backend.timeout_ms", 3000)?
        .set_default("cookie.secure", false)?
        .set_default("cookie.max_age_seconds", 604800)
}

fn missing_backend_url() -> crate::error::AppError {
    crate::error::AppError::Config(format!(
        "{BACKEND_URL_ENV} must be set to the backend auth service URL"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            backend: BackendConfig {
                url: Url::parse("http://127.0.0.1:3000").unwrap(),
                timeout_ms: 3000,
            },
            cookie: CookieConfig {
                secure: false,
                max_age_seconds: 604_800,
            },
        }
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_http_backend() {
        let mut config = valid_config();
        config.backend.url = Url::parse("ftp://127.0.0.1/").unwrap();

        let error = config
            .validate()
            .expect_err("ftp backends must be rejected");
        assert!(matches!(
            error,
            crate::error::AppError::Config(message) if message.contains("backend.url")
        ));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = valid_config();
        config.backend.timeout_ms = 0;

        let error = config.validate().expect_err("zero timeout must fail");
        assert!(matches!(
            error,
            crate::error::AppError::Config(message) if message.contains("timeout_ms")
        ));
    }

    #[test]
    fn validate_rejects_non_positive_cookie_age() {
        let mut config = valid_config();
        config.cookie.max_age_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn blank_backend_url_is_fatal() {
        let error = AppConfig::from_sources(defaults().unwrap(), "   ")
            .expect_err("a blank backend url is fatal");
        assert!(matches!(
            error,
            crate::error::AppError::Config(message) if message.contains(BACKEND_URL_ENV)
        ));
    }

    #[test]
    fn backend_url_overrides_other_sources() {
        let builder = defaults()
            .unwrap()
            .set_override("backend.url", "http://elsewhere:9999")
            .unwrap();

        let config = AppConfig::from_sources(builder, "http://auth.internal:3000").unwrap();
        assert_eq!(config.backend.url.as_str(), "http://auth.internal:3000/");
    }

    #[test]
    fn defaults_fill_everything_but_the_backend_url() {
        let config = AppConfig::from_sources(defaults().unwrap(), "http://auth.internal:3000")
            .expect("config loads");

        assert_eq!(config.backend.url.as_str(), "http://auth.internal:3000/");
        assert_eq!(config.backend.timeout(), std::time::Duration::from_secs(3));
        assert_eq!(config.cookie.max_age_seconds, 604_800);
        assert!(!config.cookie.secure);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn load_fails_without_backend_url_env() {
        temp_env::with_vars(
            [
                (BACKEND_URL_ENV, None),
                ("GATEHOUSE__BACKEND__URL", Some("http://127.0.0.1:3000")),
            ],
            || {
                let error = AppConfig::load().expect_err("BACKEND_URL is required");
                assert!(matches!(
                    error,
                    crate::error::AppError::Config(message) if message.contains(BACKEND_URL_ENV)
                ));
            },
        );
    }

    #[test]
    fn load_fails_with_blank_backend_url_env() {
        temp_env::with_vars(
            [
                (BACKEND_URL_ENV, Some("  ")),
                ("GATEHOUSE__BACKEND__URL", Some("http://127.0.0.1:3000")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
