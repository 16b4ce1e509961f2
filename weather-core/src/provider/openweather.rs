use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    config::{Config, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS},
    error::LookupError,
    model::{Units, WeatherSnapshot},
};

use super::WeatherProvider;

/// Client for the OpenWeatherMap current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    units: Units,
    timeout: Duration,
    http: Client,
}

impl OpenWeatherProvider {
    /// Provider for the public endpoint with default units and request timeout.
    pub fn new(api_key: String) -> Result<Self> {
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            units: Units::default(),
            timeout,
            http: http_client(timeout)?,
        })
    }

    /// Build a provider with the configured endpoint, units and request timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?.to_owned();
        let timeout = config.timeout();

        Ok(Self {
            api_key,
            endpoint: config.endpoint.clone(),
            units: config.units,
            timeout,
            http: http_client(timeout)?,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Replace the request timeout; rebuilds the HTTP client.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = http_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, LookupError> {
        debug!(
            city,
            endpoint = %self.endpoint,
            units = %self.units,
            "requesting current weather"
        );

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .map_err(|err| {
                warn!(city, error = %err, "OpenWeather request failed");
                LookupError::Transport(err.to_string())
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            warn!(city, error = %err, "failed to read OpenWeather response body");
            LookupError::Transport(err.to_string())
        })?;

        if !status.is_success() {
            let message = provider_message(&body);
            warn!(
                city,
                status = status.as_u16(),
                body = %truncate_body(&body),
                "OpenWeather returned an error"
            );
            return Err(LookupError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        decode_current(&body, self.units).inspect_err(|err| {
            warn!(
                city,
                error = %err,
                body = %truncate_body(&body),
                "unexpected OpenWeather payload"
            );
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: Option<OwSys>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

/// Typed decode of a 2xx body. Anything short of the full shape is `Malformed`.
fn decode_current(body: &str, units: Units) -> Result<WeatherSnapshot, LookupError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)
        .map_err(|err| LookupError::Malformed(format!("invalid current weather JSON: {err}")))?;

    let Some(condition) = parsed.weather.into_iter().next() else {
        return Err(LookupError::Malformed(
            "response contained no weather conditions".into(),
        ));
    };

    Ok(WeatherSnapshot {
        city: parsed.name,
        country: parsed.sys.map(|s| s.country).unwrap_or_default(),
        temperature: parsed.main.temp,
        description: condition.description,
        icon: condition.icon,
        humidity_pct: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        units,
    })
}

/// The `message` field of an error body, if the body is JSON and has one.
fn provider_message(body: &str) -> Option<String> {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
