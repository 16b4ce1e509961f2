//! The single-page view as a prompt loop: input, submit, render.

use anyhow::Context;
use inquire::{InquireError, Text};
use weather_lookup_core::{Config, OpenWeatherProvider, ViewOptions, WeatherLookup, render};

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let provider = OpenWeatherProvider::from_config(config)?;
    let view = ViewOptions::from(config);
    let mut lookup = WeatherLookup::new(provider);

    println!("Weather App  (Esc or Ctrl-C to quit)");

    loop {
        let input = Text::new("City:")
            .with_placeholder("Enter city name")
            .with_initial_value(lookup.state().query())
            .prompt();

        let query = match input {
            Ok(query) => query,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };
        lookup.set_query(query);

        // Blank input: nothing to do.
        let Some(pending) = lookup.begin_current() else {
            continue;
        };
        println!("{}", render(lookup.state(), &view));

        let completion = pending.resolve(lookup.provider()).await;
        lookup.apply(completion);

        println!("{}\n", render(lookup.state(), &view));
    }

    Ok(())
}

