//! Unit conversions used when normalizing provider payloads.

use chrono::{DateTime, TimeZone};

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn round_i32(value: f64) -> i32 {
    round_half_up(value) as i32
}

pub fn mps_to_kmh(speed: f64) -> i32 {
    round_i32(speed * 3.6)
}

/// Whole kilometres, truncated.
pub fn meters_to_km(meters: u32) -> u32 {
    meters / 1000
}

/// Rough dew point from temperature (°C) and relative humidity (%).
pub fn approx_dew_point(temperature: f64, humidity: u8) -> i32 {
    round_i32(temperature - (100.0 - f64::from(humidity)) / 5.0)
}

/// `HH:MM` 24-hour clock in `tz`; `--:--` if the timestamp is out of range.
pub fn clock_time<Tz: TimeZone>(epoch_secs: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|utc| utc.with_timezone(tz).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
