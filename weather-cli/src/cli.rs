use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use tracing::debug;
use weather_lookup_core::{
    Config, OpenWeatherProvider, Phase, Units, ViewOptions, WeatherLookup, WeatherProvider, render,
};

use crate::interactive;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather lookup")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// OpenWeatherMap API key; overrides the config file.
    #[arg(
        long,
        global = true,
        env = "OPENWEATHER_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and unit system.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: String,
    },

    /// Prompt for cities until Esc or Ctrl-C (the default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(config, self.config.as_deref()),
            Command::Show { city } => {
                let config = config.with_api_key_override(self.api_key);
                show(&config, &city).await
            }
            Command::Interactive => {
                let config = config.with_api_key_override(self.api_key);
                interactive::run(&config).await
            }
        }
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

fn configure(mut config: Config, path: Option<&Path>) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("API key prompt aborted")?;

    if api_key.trim().is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    let start = Units::all()
        .iter()
        .position(|u| *u == config.units)
        .unwrap_or_default();
    let units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Units prompt aborted")?;

    config.set_api_key(api_key);
    config.units = units;

    match path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    debug!(units = %config.units, "configuration saved");

    println!("Configuration saved.");
    Ok(())
}

async fn show(config: &Config, city: &str) -> anyhow::Result<()> {
    let provider = OpenWeatherProvider::from_config(config)?;
    let view = ViewOptions::from(config);
    let mut lookup = WeatherLookup::new(provider);

    if let Some(card) = lookup_card(&mut lookup, city, &view).await? {
        println!("{card}");
    }
    Ok(())
}

/// Card for `city`, or `None` when the name is blank and nothing was fetched.
async fn lookup_card<P: WeatherProvider>(
    lookup: &mut WeatherLookup<P>,
    city: &str,
    view: &ViewOptions,
) -> anyhow::Result<Option<String>> {
    if !lookup.submit(city).await {
        debug!("blank city name, nothing to look up");
        return Ok(None);
    }

    match lookup.state().phase() {
        Phase::Failed(message) => Err(anyhow!("{message}")),
        _ => Ok(Some(render(lookup.state(), view))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_takes_city_and_global_flags() {
        let cli = Cli::try_parse_from([
            "weather",
            "show",
            "New York",
            "--api-key",
            "KEY",
            "--config",
            "/tmp/weather.toml",
            "-vv",
        ])
        .expect("parse");

        assert!(matches!(cli.command, Some(Command::Show { ref city }) if city == "New York"));
        assert_eq!(cli.api_key.as_deref(), Some("KEY"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/weather.toml")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn show_requires_city() {
        assert!(Cli::try_parse_from(["weather", "show"]).is_err());
    }

    #[tokio::test]
    async fn blank_city_is_silently_ignored() {
        let mut config = Config::default();
        config.set_api_key("KEY".into());
        config.endpoint = "http://127.0.0.1:9/weather".into();

        let provider = OpenWeatherProvider::from_config(&config).expect("provider");
        let mut lookup = WeatherLookup::new(provider);
        let view = ViewOptions::from(&config);

        let card = lookup_card(&mut lookup, "   ", &view)
            .await
            .expect("no error");
        assert_eq!(card, None);
        assert_eq!(lookup.state().phase(), &Phase::Idle);
    }
}
