//! Configuration management for the pawcast application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PawcastError;
use crate::units::TemperatureUnit;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the pawcast application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PawcastConfig {
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Geocoding API configuration
    pub geocoding: GeocodingConfig,
    /// Cache configuration
    pub cache: CacheConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Default application settings
    pub defaults: DefaultsConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// weatherapi.com key
    pub api_key: Option<String>,
    /// Base URL for weather API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    pub max_retries: u32,
    /// Days requested from the forecast endpoint
    pub forecast_days: u32,
}

/// Geocoding API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// OpenCage key
    pub api_key: Option<String>,
    pub base_url: String,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Forecast cache TTL in minutes
    pub ttl_minutes: u32,
    /// Cache directory location, empty disables caching
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Display unit when none is requested
    pub unit: TemperatureUnit,
    /// Location used when none is requested
    pub location: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    15
}

fn default_weather_max_retries() -> u32 {
    2
}

fn default_forecast_days() -> u32 {
    7
}

fn default_geocoding_base_url() -> String {
    "https://api.opencagedata.com/geocode/v1".to_string()
}

fn default_cache_ttl() -> u32 {
    60
}

fn default_cache_location() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("pawcast").to_string_lossy().into_owned())
        .unwrap_or_else(|| ".pawcast-cache".to_string())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_location() -> String {
    "New York".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_geocoding_base_url(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_cache_ttl(),
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            unit: TemperatureUnit::default(),
            location: default_location(),
        }
    }
}

impl PawcastConfig {
    /// Load configuration from `config_path` (or the default location) and the environment
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
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

        // Environment overrides, e.g. PAWCAST_WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("PAWCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PawcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pawcast").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.weather.forecast_days == 0 {
            self.weather.forecast_days = default_forecast_days();
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.cache.ttl_minutes == 0 {
            self.cache.ttl_minutes = default_cache_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.defaults.location.trim().is_empty() {
            self.defaults.location = default_location();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        let keys = [
            ("Weather", self.weather.api_key.as_deref()),
            ("Geocoding", self.geocoding.api_key.as_deref()),
        ];
        for (name, key) in keys {
            let Some(key) = key else { continue };
            if key.trim().is_empty() {
                return Err(PawcastError::config(format!(
                    "{name} API key cannot be empty if provided. Either remove it or provide a valid key."
                ))
                .into());
            }
            if key.len() < 8 || key.len() > 100 {
                return Err(PawcastError::config(format!(
                    "{name} API key appears to be invalid. Please check your API key."
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(PawcastError::config("Weather API timeout cannot exceed 300 seconds").into());
        }

        if self.weather.max_retries > 10 {
            return Err(PawcastError::config("Weather API max retries cannot exceed 10").into());
        }

        if self.weather.forecast_days > 14 {
            return Err(PawcastError::config("Forecast days cannot exceed 14").into());
        }

        if self.cache.ttl_minutes > 24 * 60 {
            return Err(PawcastError::config("Cache TTL cannot exceed 1440 minutes (1 day)").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PawcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PawcastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Weather", &self.weather.base_url),
            ("Geocoding", &self.geocoding.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PawcastError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PawcastConfig::default();
        assert_eq!(config.weather.base_url, "https://api.weatherapi.com/v1");
        assert_eq!(config.weather.forecast_days, 7);
        assert_eq!(config.cache.ttl_minutes, 60);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.location, "New York");
        assert_eq!(config.defaults.unit, TemperatureUnit::Fahrenheit);
        assert!(config.weather.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = PawcastConfig::default();
        config.weather.api_key = Some("abc".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation_valid_api_key() {
        let mut config = PawcastConfig::default();
        config.weather.api_key = Some("valid_api_key_123".to_string());
        config.geocoding.api_key = Some("another_valid_key".to_string());
        assert!(config.validate_api_keys().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = PawcastConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = PawcastConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = PawcastConfig::default();
        config.weather.base_url.clear();
        config.defaults.location = "  ".to_string();
        config.cache.ttl_minutes = 0;
        config.apply_defaults();
        assert_eq!(config.weather.base_url, "https://api.weatherapi.com/v1");
        assert_eq!(config.defaults.location, "New York");
        assert_eq!(config.cache.ttl_minutes, 60);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = std::env::temp_dir().join(format!("pawcast-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            "[defaults]\nunit = \"C\"\nlocation = \"Portland\"\n\n[server]\nport = 9000\n",
        )
        .unwrap();

        let config = PawcastConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.defaults.unit, TemperatureUnit::Celsius);
        assert_eq!(config.defaults.location, "Portland");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.weather.forecast_days, 7);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = PawcastConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("pawcast"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
