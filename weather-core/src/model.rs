use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};

/// What a lookup is about: a free-text place name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationKey {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl LocationKey {
    pub fn city(name: impl Into<String>) -> Self {
        Self::City(name.into())
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Self::Coordinates { lat, lon }
    }

    /// Interpret `"<lat>,<lon>"` as coordinates, anything else as a city name.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if let Some((lat, lon)) = trimmed.split_once(',') {
            if let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) {
                return Self::Coordinates { lat, lon };
            }
        }
        Self::City(trimmed.to_string())
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::City(name) if name.trim().is_empty() => Err(WeatherError::InvalidLocation(
                "city name must not be empty".to_string(),
            )),
            Self::Coordinates { lat, lon } if !lat.is_finite() || !lon.is_finite() => {
                Err(WeatherError::InvalidLocation(format!(
                    "coordinates must be numeric, got ({lat}, {lon})"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Location name used when the real one could not be fetched.
    pub fn fallback_label(&self) -> String {
        match self {
            Self::City(name) => name.clone(),
            Self::Coordinates { .. } => "Your Location".to_string(),
        }
    }

    /// Query parameters identifying this location to the provider.
    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::City(name) => vec![("q", name.trim().to_string())],
            Self::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }
}

impl std::fmt::Display for LocationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City(name) => f.write_str(name),
            Self::Coordinates { lat, lon } => write!(f, "{lat},{lon}"),
        }
    }
}

/// One summarized forecast day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: String,
    pub high: i32,
    pub low: i32,
    pub condition: String,
    pub icon: String,
}

impl ForecastDay {
    fn new(day: &str, high: i32, low: i32, condition: &str, icon: &str) -> Self {
        Self {
            day: day.to_string(),
            high,
            low,
            condition: condition.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Normalized current conditions: everything in a snapshot except the forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditions {
    pub location: String,
    pub country: String,
    pub temperature: i32,
    pub condition: String,
    pub description: String,
    pub humidity: u8,
    /// km/h
    pub wind_speed: i32,
    pub wind_direction: String,
    /// km
    pub visibility: u32,
    /// `None` when the data source does not report one.
    pub uv_index: Option<u8>,
    /// hPa
    pub pressure: u32,
    pub feels_like: i32,
    pub dew_point: i32,
    pub sunrise: String,
    pub sunset: String,
}

impl Conditions {
    pub fn with_forecast(self, forecast: Vec<ForecastDay>) -> WeatherSnapshot {
        WeatherSnapshot { current: self, forecast }
    }
}

/// The canonical lookup result handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    #[serde(flatten)]
    pub current: Conditions,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherSnapshot {
    /// Fixed snapshot substituted when current conditions cannot be fetched.
    pub fn placeholder(location: impl Into<String>) -> Self {
        let current = Conditions {
            location: location.into(),
            country: "Unknown".to_string(),
            temperature: 25,
            condition: "Partly Cloudy".to_string(),
            description: "Weather data temporarily unavailable".to_string(),
            humidity: 65,
            wind_speed: 10,
            wind_direction: "NE".to_string(),
            visibility: 10,
            uv_index: Some(5),
            pressure: 1013,
            feels_like: 28,
            dew_point: 18,
            sunrise: "06:30".to_string(),
            sunset: "18:30".to_string(),
        };

        current.with_forecast(vec![
            ForecastDay::new("Today", 27, 22, "Partly Cloudy", "cloud"),
            ForecastDay::new("Tomorrow", 26, 21, "Sunny", "sun"),
            ForecastDay::new("Wednesday", 24, 19, "Rainy", "rain"),
            ForecastDay::new("Thursday", 28, 23, "Sunny", "sun"),
            ForecastDay::new("Friday", 25, 20, "Partly Cloudy", "cloud"),
        ])
    }
}
