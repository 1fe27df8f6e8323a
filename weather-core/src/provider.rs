use crate::{
    Config,
    error::Result,
    model::{Conditions, ForecastDay, LocationKey},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions and daily forecasts for a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions, normalized. Every failure is classified.
    async fn conditions(&self, key: &LocationKey) -> Result<Conditions>;

    /// Up to five daily summaries. A non-success response is an empty list, not an error.
    async fn forecast(&self, key: &LocationKey) -> Result<Vec<ForecastDay>>;
}

/// Construct the provider described by `config`.
///
/// A missing API key is not an error here; it surfaces from the first fetch so the
/// lookup can fall back like any other failure.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>> {
    Ok(Box::new(OpenWeatherProvider::new(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;

    #[test]
    fn provider_from_config_builds_without_api_key() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[tokio::test]
    async fn missing_api_key_surfaces_from_fetch() {
        let provider = provider_from_config(&Config::default()).unwrap();
        let err = provider.conditions(&LocationKey::city("Paris")).await.unwrap_err();
        assert!(matches!(err, WeatherError::Configuration(_)));
    }
}
