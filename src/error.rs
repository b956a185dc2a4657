//! Error types and handling for the pawcast application

use thiserror::Error;

/// Main error type for the pawcast application
#[derive(Error, Debug)]
pub enum PawcastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather or geocoding provider errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Forecast retrieval failures
    #[error("Forecast error: {message}")]
    ForecastUnavailable { message: String },

    /// Location lookups that returned nothing
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// A hex color string that is not `#rgb` or `#rrggbb`
    #[error("Invalid color format: '{input}'")]
    InvalidColorFormat { input: String },
}

impl PawcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn forecast_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ForecastUnavailable {
            message: message.into(),
        }
    }

    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    pub fn invalid_color<S: Into<String>>(input: S) -> Self {
        Self::InvalidColorFormat {
            input: input.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PawcastError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            PawcastError::Api { .. } => "Failed to fetch weather data.".to_string(),
            PawcastError::Validation { message } => message.clone(),
            PawcastError::ForecastUnavailable { .. } => {
                "Forecast unavailable. Please check your connection.".to_string()
            }
            PawcastError::LocationNotFound { .. } => {
                "Location not found for that postal code.".to_string()
            }
            PawcastError::InvalidColorFormat { input } => {
                format!("'{input}' is not a #rgb or #rrggbb color")
            }
        }
    }
}
