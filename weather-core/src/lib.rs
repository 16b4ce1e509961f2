//! Core library for the `weather` lookup tool.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeatherMap provider and its typed response decoding
//! - The lookup unit: request phases, request fencing, rendering
//!
//! It is used by `weather-lookup`, but can also be embedded in other front ends.

pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;
pub mod render;

pub use config::Config;
pub use error::LookupError;
pub use lookup::{Completion, LookupState, PendingLookup, Phase, RequestId, WeatherLookup};
pub use model::{Units, WeatherSnapshot};
pub use provider::{OpenWeatherProvider, WeatherProvider};
pub use render::{ViewOptions, render};
