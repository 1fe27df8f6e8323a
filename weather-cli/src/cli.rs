use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{Config, LocationKey, Lookup, WeatherError, lookup, provider_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show weather for a city, or for "<lat>,<lon>".
    Show {
        /// City name, e.g. "London" or "Paris,FR", or coordinates like "48.85,2.35".
        #[arg(allow_hyphen_values = true)]
        location: String,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show weather for a coordinate pair.
    Coords {
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        #[arg(allow_negative_numbers = true)]
        lon: f64,

        /// Print the snapshot as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, json } => {
                show(LocationKey::parse(&location), json).await
            }
            Command::Coords { lat, lon, json } => {
                show(LocationKey::coordinates(lat, lon), json).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(key);
    config.api_key().context("API key must not be empty")?;
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(key: LocationKey, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?.with_env_overrides();
    let provider = provider_from_config(&config)?;

    let result = lookup(provider.as_ref(), &key).await;

    if let Lookup::Placeholder { reason, .. } = &result {
        eprintln!("{}", degraded_notice(reason));
    }

    let snapshot = result.into_snapshot();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?
        );
    } else {
        print!("{}", render::snapshot(&snapshot));
    }

    Ok(())
}

/// Warning printed when the lookup fell back to placeholder data.
fn degraded_notice(reason: &WeatherError) -> String {
    if reason.is_fatal_config() {
        format!(
            "warning: {}. Run `weather configure` to set a valid API key. \
             Showing placeholder data.",
            reason.user_message()
        )
    } else {
        format!("warning: {}. Showing placeholder data.", reason.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_json_flag() {
        let cli = Cli::try_parse_from(["weather", "show", "New York", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Show { ref location, json: true } if location == "New York"
        ));
    }

    #[test]
    fn show_accepts_coordinate_pairs() {
        let cli = Cli::try_parse_from(["weather", "show", "-33.87,151.21"]).unwrap();
        let Command::Show { location, .. } = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(LocationKey::parse(&location), LocationKey::coordinates(-33.87, 151.21));
    }

    #[test]
    fn degraded_notice_hints_configure_only_for_credential_problems() {
        let notice = degraded_notice(&WeatherError::Authentication);
        assert!(notice.contains("Invalid API key"));
        assert!(notice.contains("weather configure"));

        let notice = degraded_notice(&WeatherError::Configuration("missing".into()));
        assert!(notice.contains("weather configure"));

        let notice = degraded_notice(&WeatherError::LocationNotFound("Atlantis".into()));
        assert_eq!(notice, "warning: City not found: Atlantis. Showing placeholder data.");
    }

    #[test]
    fn parses_negative_coordinates() {
        let cli = Cli::try_parse_from(["weather", "coords", "-33.87", "151.21"]).unwrap();
        match cli.command {
            Command::Coords { lat, lon, json } => {
                assert_eq!(lat, -33.87);
                assert_eq!(lon, 151.21);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["weather", "show", "Oslo", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_non_numeric_coordinates() {
        assert!(Cli::try_parse_from(["weather", "coords", "north", "5"]).is_err());
    }
}
