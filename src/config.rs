//! Configuration management for the `nalssi` gateway
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::NalssiError;
use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NalssiConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Commercial weather proxy (serverless edge function) settings
    #[serde(default)]
    pub edge: EdgeConfig,
    /// Open-Meteo endpoints
    #[serde(default)]
    pub open_meteo: OpenMeteoConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Directory with the built frontend, served for non-API paths
    pub static_dir: Option<String>,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
}

/// Edge function settings. The bearer token is a secret and only ever
/// comes from the config file or `NALSSI_EDGE__BEARER_TOKEN`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Weather proxy function, called with `?endpoint=...`
    pub weather_url: Option<String>,
    /// Air quality function
    pub air_quality_url: Option<String>,
    pub bearer_token: Option<String>,
}

/// Open-Meteo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenMeteoConfig {
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    #[serde(default = "default_air_quality_base_url")]
    pub air_quality_base_url: String,
    /// IANA timezone forwarded to Open-Meteo
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Upstream request timeout in seconds
    #[serde(default = "default_upstream_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
    /// OTLP/HTTP collector endpoint; span export is off when unset
    pub otlp_endpoint: Option<String>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u32 {
    30
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_air_quality_base_url() -> String {
    "https://air-quality-api.open-meteo.com/v1".to_string()
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

fn default_upstream_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            static_dir: None,
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: default_geocoding_base_url(),
            forecast_base_url: default_forecast_base_url(),
            air_quality_base_url: default_air_quality_base_url(),
            timezone: default_timezone(),
            timeout_seconds: default_upstream_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            otlp_endpoint: None,
        }
    }
}

impl NalssiConfig {
    /// Load configuration from `config_path` (or the default location) and
    /// `NALSSI_*` environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // NALSSI_EDGE__BEARER_TOKEN -> edge.bearer_token
        builder = builder.add_source(
            Environment::with_prefix("NALSSI")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: NalssiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("nalssi").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.open_meteo.timezone.is_empty() {
            self.open_meteo.timezone = default_timezone();
        }
        if self.open_meteo.timeout_seconds == 0 {
            self.open_meteo.timeout_seconds = default_upstream_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        // Blank secrets from the environment mean "unset".
        if self
            .edge
            .bearer_token
            .as_ref()
            .is_some_and(|token| token.trim().is_empty())
        {
            self.edge.bearer_token = None;
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_urls()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        let urls = [
            ("open_meteo.geocoding_base_url", Some(&self.open_meteo.geocoding_base_url)),
            ("open_meteo.forecast_base_url", Some(&self.open_meteo.forecast_base_url)),
            ("open_meteo.air_quality_base_url", Some(&self.open_meteo.air_quality_base_url)),
            ("edge.weather_url", self.edge.weather_url.as_ref()),
            ("edge.air_quality_url", self.edge.air_quality_url.as_ref()),
            ("logging.otlp_endpoint", self.logging.otlp_endpoint.as_ref()),
        ];

        for (name, url) in urls {
            if let Some(url) = url
                && !url.starts_with("http://")
                && !url.starts_with("https://")
            {
                return Err(NalssiError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.open_meteo.timeout_seconds > 300 {
            return Err(
                NalssiError::config("Upstream timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                NalssiError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(NalssiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(NalssiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.open_meteo.timezone.parse::<Tz>().is_err() {
            return Err(NalssiError::config(format!(
                "Unknown timezone '{}'",
                self.open_meteo.timezone
            ))
            .into());
        }

        if self.server.tls_cert_path.is_some() != self.server.tls_key_path.is_some() {
            return Err(NalssiError::config(
                "server.tls_cert_path and server.tls_key_path must be set together",
            )
            .into());
        }

        Ok(())
    }
}
