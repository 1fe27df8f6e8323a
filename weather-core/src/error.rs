//! Failure taxonomy for weather lookups.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Provider rejected the API key")]
    Authentication,

    #[error("Provider request failed with status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse provider response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WeatherError {
    /// Short message suitable for showing to a user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(_) => "No API key configured".to_string(),
            Self::InvalidLocation(msg) => format!("Invalid location: {msg}"),
            Self::LocationNotFound(city) => format!("City not found: {city}"),
            Self::Authentication => "Invalid API key".to_string(),
            Self::Provider { status, .. } => format!("Weather service error ({status})"),
            Self::Network(_) => "Network error, check your connection".to_string(),
            Self::Parse(_) => "Unexpected response from the weather service".to_string(),
        }
    }

    /// Whether the user can fix this by (re)configuring the credential.
    pub fn is_fatal_config(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Authentication)
    }
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;
