//! One weather lookup: current conditions, then the forecast, with a fixed fallback.

use crate::{
    error::WeatherError,
    model::{LocationKey, WeatherSnapshot},
    provider::WeatherProvider,
};

/// Outcome of [`lookup`]. Either way the snapshot is fully populated.
#[derive(Debug)]
pub enum Lookup {
    Live(WeatherSnapshot),
    /// Current conditions could not be fetched; `snapshot` is the placeholder.
    Placeholder {
        snapshot: WeatherSnapshot,
        reason: WeatherError,
    },
}

impl Lookup {
    pub fn snapshot(&self) -> &WeatherSnapshot {
        match self {
            Self::Live(snapshot) | Self::Placeholder { snapshot, .. } => snapshot,
        }
    }

    pub fn into_snapshot(self) -> WeatherSnapshot {
        match self {
            Self::Live(snapshot) | Self::Placeholder { snapshot, .. } => snapshot,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }

    pub fn failure(&self) -> Option<&WeatherError> {
        match self {
            Self::Live(_) => None,
            Self::Placeholder { reason, .. } => Some(reason),
        }
    }
}

/// Fetch conditions and forecast for `key`.
///
/// A conditions failure replaces the whole result with the placeholder snapshot and the
/// forecast is never requested. A forecast failure only empties the forecast.
pub async fn lookup<P>(provider: &P, key: &LocationKey) -> Lookup
where
    P: WeatherProvider + ?Sized,
{
    let conditions = match provider.conditions(key).await {
        Ok(conditions) => conditions,
        Err(err) => {
            tracing::error!(
                location = %key,
                error = %err,
                "Weather lookup failed, using placeholder data"
            );
            return Lookup::Placeholder {
                snapshot: WeatherSnapshot::placeholder(key.fallback_label()),
                reason: err,
            };
        }
    };

    let forecast = provider.forecast(key).await.unwrap_or_else(|err| {
        tracing::warn!(location = %key, error = %err, "Forecast unavailable");
        Vec::new()
    });

    Lookup::Live(conditions.with_forecast(forecast))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Result,
        model::{Conditions, ForecastDay},
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Copy)]
    enum Outcome {
        Ok,
        NotFound,
        Unauthorized,
        ServerError,
    }

    impl Outcome {
        fn error(self, key: &LocationKey) -> Option<WeatherError> {
            match self {
                Self::Ok => None,
                Self::NotFound => Some(WeatherError::LocationNotFound(key.to_string())),
                Self::Unauthorized => Some(WeatherError::Authentication),
                Self::ServerError => Some(WeatherError::Provider {
                    status: 500,
                    body: "internal".into(),
                }),
            }
        }
    }

    #[derive(Debug)]
    struct StubProvider {
        conditions: Outcome,
        forecast: Outcome,
        forecast_calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(conditions: Outcome, forecast: Outcome) -> Self {
            Self {
                conditions,
                forecast,
                forecast_calls: AtomicUsize::new(0),
            }
        }
    }

    fn sample_conditions() -> Conditions {
        Conditions {
            location: "Lisbon".into(),
            country: "PT".into(),
            temperature: 22,
            condition: "Sunny".into(),
            description: "clear sky".into(),
            humidity: 50,
            wind_speed: 14,
            wind_direction: "NW".into(),
            visibility: 10,
            uv_index: None,
            pressure: 1018,
            feels_like: 22,
            dew_point: 12,
            sunrise: "06:12".into(),
            sunset: "20:55".into(),
        }
    }

    fn sample_day() -> ForecastDay {
        ForecastDay {
            day: "Today".into(),
            high: 24,
            low: 16,
            condition: "Sunny".into(),
            icon: "sun".into(),
        }
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn conditions(&self, key: &LocationKey) -> Result<Conditions> {
            match self.conditions.error(key) {
                Some(err) => Err(err),
                None => Ok(sample_conditions()),
            }
        }

        async fn forecast(&self, key: &LocationKey) -> Result<Vec<ForecastDay>> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            match self.forecast.error(key) {
                Some(err) => Err(err),
                None => Ok(vec![sample_day()]),
            }
        }
    }

    #[tokio::test]
    async fn live_lookup_merges_forecast() {
        let provider = StubProvider::new(Outcome::Ok, Outcome::Ok);
        let result = lookup(&provider, &LocationKey::city("Lisbon")).await;

        assert!(!result.is_placeholder());
        let snap = result.into_snapshot();
        assert_eq!(snap.current, sample_conditions());
        assert_eq!(snap.forecast, vec![sample_day()]);
    }

    #[tokio::test]
    async fn forecast_failure_keeps_live_conditions() {
        let provider = StubProvider::new(Outcome::Ok, Outcome::ServerError);
        let result = lookup(&provider, &LocationKey::city("Lisbon")).await;

        assert!(result.failure().is_none());
        let snap = result.snapshot();
        assert_eq!(snap.current.location, "Lisbon");
        assert!(snap.forecast.is_empty());
    }

    #[tokio::test]
    async fn conditions_failure_yields_placeholder_for_city() {
        let provider = StubProvider::new(Outcome::NotFound, Outcome::Ok);
        let result = lookup(&provider, &LocationKey::city("Nonexistentville")).await;

        assert!(matches!(result.failure(), Some(WeatherError::LocationNotFound(_))));
        assert_eq!(result.into_snapshot(), WeatherSnapshot::placeholder("Nonexistentville"));
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn conditions_failure_yields_placeholder_for_coordinates() {
        let provider = StubProvider::new(Outcome::Unauthorized, Outcome::Ok);
        let result = lookup(&provider, &LocationKey::coordinates(38.7, -9.1)).await;

        assert!(result.is_placeholder());
        let snap = result.into_snapshot();
        assert_eq!(snap.current.location, "Your Location");
        assert_eq!(snap.current.country, "Unknown");
        assert_eq!(snap.forecast.len(), 5);
    }

    #[tokio::test]
    async fn works_through_trait_object() {
        let provider: Box<dyn WeatherProvider> =
            Box::new(StubProvider::new(Outcome::Ok, Outcome::Ok));
        let result = lookup(provider.as_ref(), &LocationKey::city("Lisbon")).await;
        assert!(!result.is_placeholder());
    }
}
