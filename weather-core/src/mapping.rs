//! Provider vocabulary to app vocabulary.

use crate::convert::round_half_up;

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Map a provider weather code (e.g. `"Clouds"`) to its display label.
/// Unknown codes pass through unchanged.
pub fn canonical_condition(code: &str) -> &str {
    match code {
        "Clear" => "Sunny",
        "Clouds" => "Partly Cloudy",
        "Rain" => "Rainy",
        "Drizzle" => "Light Rain",
        "Thunderstorm" => "Thunderstorm",
        "Snow" => "Snowy",
        "Mist" => "Misty",
        "Fog" => "Foggy",
        other => other,
    }
}

/// Icon key for a provider weather code; anything unmapped is `cloud`.
pub fn canonical_icon(code: &str) -> &'static str {
    match code {
        "Clear" => "sun",
        "Rain" | "Drizzle" | "Thunderstorm" => "rain",
        _ => "cloud",
    }
}

/// 16-point compass label for a bearing in degrees, 22.5° per sector.
pub fn compass_direction(degrees: f64) -> &'static str {
    let sector = round_half_up(degrees / 22.5).rem_euclid(16);
    COMPASS[sector as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: [(&str, &str, &str); 8] = [
        ("Clear", "Sunny", "sun"),
        ("Clouds", "Partly Cloudy", "cloud"),
        ("Rain", "Rainy", "rain"),
        ("Drizzle", "Light Rain", "rain"),
        ("Thunderstorm", "Thunderstorm", "rain"),
        ("Snow", "Snowy", "cloud"),
        ("Mist", "Misty", "cloud"),
        ("Fog", "Foggy", "cloud"),
    ];

    #[test]
    fn mapped_codes_match_table() {
        for (code, label, icon) in TABLE {
            assert_eq!(canonical_condition(code), label, "condition for {code}");
            assert_eq!(canonical_icon(code), icon, "icon for {code}");
        }
    }

    #[test]
    fn unmapped_codes_pass_through_with_cloud_icon() {
        for code in ["Haze", "Smoke", "Tornado", ""] {
            assert_eq!(canonical_condition(code), code);
            assert_eq!(canonical_icon(code), "cloud");
        }
    }

    #[test]
    fn compass_cardinal_points() {
        assert_eq!(compass_direction(0.0), "N");
        assert_eq!(compass_direction(359.0), "N");
        assert_eq!(compass_direction(90.0), "E");
        assert_eq!(compass_direction(180.0), "S");
        assert_eq!(compass_direction(270.0), "W");
    }

    #[test]
    fn compass_sector_boundaries_round_up() {
        // 11.25 is exactly half a sector.
        assert_eq!(compass_direction(11.24), "N");
        assert_eq!(compass_direction(11.25), "NNE");
        assert_eq!(compass_direction(45.0), "NE");
        assert_eq!(compass_direction(348.75), "N");
        assert_eq!(compass_direction(337.5), "NNW");
    }
}
