use crate::{WeatherSnapshot, error::LookupError};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// A source of current weather conditions for a city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, LookupError>;
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for Box<P> {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, LookupError> {
        (**self).current_weather(city).await
    }
}

#[async_trait]
impl<P: WeatherProvider + ?Sized> WeatherProvider for std::sync::Arc<P> {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, LookupError> {
        (**self).current_weather(city).await
    }
}
