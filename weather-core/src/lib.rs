//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client and payload normalization
//! - Day bucketing of the 3-hourly forecast
//! - Lookup orchestration with a fixed placeholder fallback
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod convert;
pub mod error;
pub mod forecast;
pub mod lookup;
pub mod mapping;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use lookup::{Lookup, lookup};
pub use model::{Conditions, ForecastDay, LocationKey, WeatherSnapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
