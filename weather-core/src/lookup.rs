//! The weather lookup unit: input capture, one request at a time, and the
//! phase the view is rendered from.
//!
//! A submit is split into a synchronous half ([`LookupState::begin`]) that moves
//! the state to `Loading`, and an asynchronous half ([`PendingLookup::resolve`])
//! whose [`Completion`] is applied back with [`LookupState::apply`]. Every begin
//! allocates a new [`RequestId`]; only the completion for the latest one is
//! applied, so a slow earlier response cannot overwrite a newer result.

use std::fmt;

use tracing::{debug, info};

use crate::{error::LookupError, model::WeatherSnapshot, provider::WeatherProvider};

/// Monotonic tag of a submitted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the current or most recent lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading { request: RequestId },
    Succeeded(WeatherSnapshot),
    /// Banner text.
    Failed(String),
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading { .. })
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            Phase::Succeeded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A started request: which city to fetch and the id to report back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub id: RequestId,
    pub city: String,
}

impl PendingLookup {
    pub async fn resolve<P: WeatherProvider + ?Sized>(self, provider: &P) -> Completion {
        let result = provider.current_weather(&self.city).await;
        Completion {
            id: self.id,
            city: self.city,
            result,
        }
    }
}

/// Outcome of a [`PendingLookup`], ready to be applied to the state.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub id: RequestId,
    pub city: String,
    pub result: Result<WeatherSnapshot, LookupError>,
}

/// All state owned by the lookup unit.
#[derive(Debug, Clone, Default)]
pub struct LookupState {
    query: String,
    active_city: Option<String>,
    phase: Phase,
    last_request: u64,
}

impl LookupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently in the input.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// City of the last successful lookup.
    pub fn active_city(&self) -> Option<&str> {
        self.active_city.as_deref()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Start a lookup for `query`. Blank input changes nothing and returns `None`.
    pub fn begin(&mut self, query: &str) -> Option<PendingLookup> {
        let city = query.trim();
        if city.is_empty() {
            return None;
        }

        self.last_request += 1;
        let id = RequestId(self.last_request);
        self.phase = Phase::Loading { request: id };

        debug!(request = %id, city, "lookup started");
        Some(PendingLookup {
            id,
            city: city.to_string(),
        })
    }

    /// Apply a finished request. Returns `false` if it was superseded and ignored.
    pub fn apply(&mut self, completion: Completion) -> bool {
        let Completion { id, city, result } = completion;

        match self.phase {
            Phase::Loading { request } if request == id => {}
            _ => {
                debug!(request = %id, city = %city, "discarding stale lookup result");
                return false;
            }
        }

        self.phase = match result {
            Ok(snapshot) => {
                info!(request = %id, city = %city, "lookup succeeded");
                self.active_city = Some(city);
                Phase::Succeeded(snapshot)
            }
            Err(err) => {
                info!(request = %id, city = %city, error = %err, "lookup failed");
                Phase::Failed(err.user_message())
            }
        };
        true
    }
}

/// The lookup unit bound to a provider.
#[derive(Debug)]
pub struct WeatherLookup<P> {
    provider: P,
    state: LookupState,
}

impl<P: WeatherProvider> WeatherLookup<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: LookupState::new(),
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.state.set_query(text);
    }

    /// Fetch weather for `query` and apply the result. Returns `false` for blank input.
    pub async fn submit(&mut self, query: &str) -> bool {
        let Some(pending) = self.state.begin(query) else {
            return false;
        };
        let completion = pending.resolve(&self.provider).await;
        self.state.apply(completion)
    }

    /// Submit whatever is currently in the input.
    pub async fn submit_current(&mut self) -> bool {
        let Some(pending) = self.begin_current() else {
            return false;
        };
        let completion = pending.resolve(&self.provider).await;
        self.state.apply(completion)
    }

    /// Synchronous half of [`submit_current`](Self::submit_current), for callers
    /// that want to show the loading view before awaiting.
    pub fn begin_current(&mut self) -> Option<PendingLookup> {
        let query = self.state.query.clone();
        self.state.begin(&query)
    }

    pub fn apply(&mut self, completion: Completion) -> bool {
        self.state.apply(completion)
    }
}
