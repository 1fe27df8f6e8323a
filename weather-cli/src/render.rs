//! Plain-text rendering of a snapshot.

use std::fmt::Write;

use weather_core::{ForecastDay, WeatherSnapshot};

pub fn snapshot(snap: &WeatherSnapshot) -> String {
    let c = &snap.current;
    let mut out = String::new();

    let _ = writeln!(out, "{}, {}", c.location, c.country);
    let _ = writeln!(out, "{}°C  {} ({})", c.temperature, c.condition, c.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "  Feels like   {}°C", c.feels_like);
    let _ = writeln!(out, "  Humidity     {}%", c.humidity);
    let _ = writeln!(out, "  Wind         {} km/h {}", c.wind_speed, c.wind_direction);
    let _ = writeln!(out, "  Visibility   {} km", c.visibility);
    let _ = writeln!(out, "  Pressure     {} hPa", c.pressure);
    let _ = writeln!(out, "  Dew point    {}°C", c.dew_point);
    let _ = writeln!(out, "  UV index     {}", uv_label(c.uv_index));
    let _ = writeln!(out, "  Sunrise      {}", c.sunrise);
    let _ = writeln!(out, "  Sunset       {}", c.sunset);

    if !snap.forecast.is_empty() {
        let _ = writeln!(out);
        for day in &snap.forecast {
            let _ = writeln!(out, "{}", forecast_line(day));
        }
    }

    out
}

fn uv_label(uv: Option<u8>) -> String {
    uv.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

fn forecast_line(day: &ForecastDay) -> String {
    format!(
        "  {:<10} {} {:>3}° / {:>3}°  {}",
        day.day,
        icon_glyph(&day.icon),
        day.high,
        day.low,
        day.condition
    )
}

fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "sun" => "☀",
        "rain" => "☂",
        _ => "☁",
    }
}
