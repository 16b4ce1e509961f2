use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit system requested from the provider. The provider does the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Result of one successful lookup. Replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    /// As reported by the provider, unrounded.
    pub temperature: f64,
    pub description: String,
    pub icon: String,
    pub humidity_pct: f64,
    pub wind_speed: f64,
    /// Unit system the provider reported `temperature` and `wind_speed` in.
    pub units: Units,
}

impl WeatherSnapshot {
    /// "London, GB"
    pub fn title(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }

    /// Display temperature. Halves round up, so -2.5 shows as -2.
    pub fn rounded_temperature(&self) -> i64 {
        (self.temperature + 0.5).floor() as i64
    }

    pub fn icon_url(&self, base: &str) -> String {
        format!("{}/{}@2x.png", base.trim_end_matches('/'), self.icon)
    }
}
