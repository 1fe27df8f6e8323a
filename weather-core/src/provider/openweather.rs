use async_trait::async_trait;
use chrono::{Local, TimeZone};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    Config,
    convert::{approx_dew_point, clock_time, meters_to_km, mps_to_kmh, round_i32},
    error::{Result, WeatherError},
    forecast::{ForecastEntry, aggregate},
    mapping::{canonical_condition, compass_direction},
    model::{Conditions, ForecastDay, LocationKey},
};

use super::WeatherProvider;

/// OpenWeatherMap 2.5 client (`/weather` and `/forecast`).
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            api_key: config.api_key().ok().map(str::to_owned),
            base_url: config.base_url().to_string(),
            http: builder.build()?,
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            WeatherError::Configuration("OpenWeatherMap API key is not configured".to_string())
        })
    }

    async fn send(&self, endpoint: &str, key: &LocationKey, api_key: &str) -> Result<Response> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut query = key.query_params();
        query.push(("appid", api_key.to_string()));
        query.push(("units", "metric".to_string()));

        tracing::debug!(%url, location = %key, "Sending OpenWeather request");

        Ok(self.http.get(&url).query(&query).send().await?)
    }

    #[instrument(skip(self, key), fields(location = %key))]
    async fn fetch_conditions(&self, key: &LocationKey) -> Result<Conditions> {
        let api_key = self.api_key()?;
        key.validate()?;

        let res = self.send("weather", key, api_key).await?;
        let status = res.status();
        let body = res.text().await?;

        tracing::debug!(%status, "OpenWeather current conditions response");

        if !status.is_success() {
            return Err(classify_failure(status, &body, key));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        Ok(normalize_conditions(parsed, &Local))
    }

    #[instrument(skip(self, key), fields(location = %key))]
    async fn fetch_forecast(&self, key: &LocationKey) -> Result<Vec<ForecastDay>> {
        let api_key = self.api_key()?;
        key.validate()?;

        let res = self.send("forecast", key, api_key).await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::warn!(
                %status,
                body = %truncate_body(&body),
                "OpenWeather forecast unavailable"
            );
            return Ok(Vec::new());
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;
        let entries = forecast_entries(parsed);

        tracing::debug!(entries = entries.len(), "OpenWeather forecast response");

        Ok(aggregate(&entries, &Local, Local::now().date_naive()))
    }
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    /// Omitted by the provider in calm conditions.
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    /// Metres, capped at 10 km by the provider; missing means the cap.
    #[serde(default = "default_visibility")]
    visibility: u32,
}

fn default_visibility() -> u32 {
    10_000
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_max: f64,
    temp_min: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    // Entries are decoded one by one so a single bad entry does not sink the rest.
    #[serde(default)]
    list: Vec<serde_json::Value>,
}

fn classify_failure(status: StatusCode, body: &str, key: &LocationKey) -> WeatherError {
    match (status, key) {
        (StatusCode::NOT_FOUND, LocationKey::City(name)) => {
            WeatherError::LocationNotFound(name.clone())
        }
        (StatusCode::UNAUTHORIZED, _) => WeatherError::Authentication,
        _ => WeatherError::Provider {
            status: status.as_u16(),
            body: truncate_body(body),
        },
    }
}

fn normalize_conditions<Tz: TimeZone>(raw: OwCurrentResponse, tz: &Tz) -> Conditions
where
    Tz::Offset: std::fmt::Display,
{
    let (code, description) = raw
        .weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

    Conditions {
        location: raw.name,
        country: raw.sys.country,
        temperature: round_i32(raw.main.temp),
        condition: canonical_condition(&code).to_string(),
        description,
        humidity: raw.main.humidity,
        wind_speed: mps_to_kmh(raw.wind.speed),
        wind_direction: compass_direction(raw.wind.deg).to_string(),
        visibility: meters_to_km(raw.visibility),
        uv_index: None,
        pressure: round_i32(raw.main.pressure).max(0) as u32,
        feels_like: round_i32(raw.main.feels_like),
        dew_point: approx_dew_point(raw.main.temp, raw.main.humidity),
        sunrise: clock_time(raw.sys.sunrise, tz),
        sunset: clock_time(raw.sys.sunset, tz),
    }
}

fn forecast_entries(raw: OwForecastResponse) -> Vec<ForecastEntry> {
    raw.list
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<OwForecastEntry>(value) {
            Ok(entry) => {
                Some(ForecastEntry {
                    dt: entry.dt,
                    temp_max: entry.main.temp_max,
                    temp_min: entry.main.temp_min,
                    code: entry.weather.into_iter().next().map(|w| w.main),
                })
            }
            Err(err) => {
                tracing::debug!(error = %err, "Skipping malformed forecast entry");
                None
            }
        })
        .collect()
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn conditions(&self, key: &LocationKey) -> Result<Conditions> {
        self.fetch_conditions(key).await
    }

    async fn forecast(&self, key: &LocationKey) -> Result<Vec<ForecastDay>> {
        self.fetch_forecast(key).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
