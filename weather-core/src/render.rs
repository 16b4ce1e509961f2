use crate::{
    config::{Config, DEFAULT_ICON_BASE_URL},
    lookup::{LookupState, Phase},
    model::WeatherSnapshot,
};

pub const LOADING_TEXT: &str = "Loading...";

/// Presentation settings derived from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub icon_base_url: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
        }
    }
}

impl From<&Config> for ViewOptions {
    fn from(config: &Config) -> Self {
        Self {
            icon_base_url: config.icon_base_url.clone(),
        }
    }
}

/// Render the lookup view: nothing, the loading line, the error banner, or the card.
pub fn render(state: &LookupState, view: &ViewOptions) -> String {
    match state.phase() {
        Phase::Idle => String::new(),
        Phase::Loading { .. } => LOADING_TEXT.to_string(),
        Phase::Failed(message) => format!("Error: {message}"),
        Phase::Succeeded(snapshot) => render_card(snapshot, view),
    }
}

/// Units are labelled from the snapshot, which knows what the provider sent.
fn render_card(snapshot: &WeatherSnapshot, view: &ViewOptions) -> String {
    let units = snapshot.units;

    format!(
        "{title}\n  {temp}{temp_unit}  {description}\n  Icon: {icon}\n  \
         Humidity: {humidity}%\n  Wind Speed: {wind} {wind_unit}",
        title = snapshot.title(),
        temp = snapshot.rounded_temperature(),
        temp_unit = units.temperature_suffix(),
        description = snapshot.description,
        icon = snapshot.icon_url(&view.icon_base_url),
        humidity = snapshot.humidity_pct,
        wind = snapshot.wind_speed,
        wind_unit = units.speed_suffix(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::LookupError, lookup::Completion, model::Units};

    fn london() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "London".into(),
            country: "GB".into(),
            temperature: 15.4,
            description: "clear sky".into(),
            icon: "01d".into(),
            humidity_pct: 70.0,
            wind_speed: 3.1,
            units: Units::Metric,
        }
    }

    fn finished(result: Result<WeatherSnapshot, LookupError>) -> LookupState {
        let mut state = LookupState::new();
        let pending = state.begin("London").expect("started");
        state.apply(Completion {
            id: pending.id,
            city: pending.city,
            result,
        });
        state
    }

    #[test]
    fn idle_renders_nothing() {
        assert_eq!(render(&LookupState::new(), &ViewOptions::default()), "");
    }

    #[test]
    fn loading_renders_indicator_only() {
        let mut state = LookupState::new();
        state.begin("London");
        assert_eq!(render(&state, &ViewOptions::default()), LOADING_TEXT);
    }

    #[test]
    fn failure_renders_banner() {
        let state = finished(Err(LookupError::Provider {
            status: 404,
            message: Some("city not found".into()),
        }));
        assert_eq!(
            render(&state, &ViewOptions::default()),
            "Error: city not found"
        );
    }

    #[test]
    fn success_renders_card() {
        let state = finished(Ok(london()));
        let expected = "London, GB\n\
                        \x20 15°C  clear sky\n\
                        \x20 Icon: https://openweathermap.org/img/wn/01d@2x.png\n\
                        \x20 Humidity: 70%\n\
                        \x20 Wind Speed: 3.1 m/s";
        assert_eq!(render(&state, &ViewOptions::default()), expected);
    }

    #[test]
    fn fractional_humidity_is_shown_as_sent() {
        let state = finished(Ok(WeatherSnapshot {
            humidity_pct: 64.5,
            ..london()
        }));
        let out = render(&state, &ViewOptions::default());
        assert!(out.contains("Humidity: 64.5%"));
    }

    #[test]
    fn imperial_snapshot_is_labelled_imperial_with_default_view() {
        let state = finished(Ok(WeatherSnapshot {
            temperature: 59.7,
            wind_speed: 6.9,
            units: Units::Imperial,
            ..london()
        }));

        let out = render(&state, &ViewOptions::default());
        assert!(out.contains("  60°F  clear sky"));
        assert!(out.ends_with("Wind Speed: 6.9 mph"));
        assert!(!out.contains("°C"));
    }

    #[test]
    fn icon_base_comes_from_view() {
        let state = finished(Ok(london()));
        let view = ViewOptions {
            icon_base_url: "http://icons/".into(),
        };

        let out = render(&state, &view);
        assert!(out.contains("Icon: http://icons/01d@2x.png"));
    }
}
