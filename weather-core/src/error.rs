use thiserror::Error;

/// Banner text when nothing more specific is known.
pub const FALLBACK_MESSAGE: &str = "Failed to fetch weather data";

/// Banner text for a non-2xx status without a provider message.
pub const PROVIDER_FALLBACK_MESSAGE: &str = "City not found or API error";

/// Ways a single lookup can fail. Blank input never gets this far.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("weather provider unreachable: {0}")]
    Transport(String),

    #[error(
        "weather provider returned status {status}: {}",
        .message.as_deref().unwrap_or("<no message>")
    )]
    Provider {
        status: u16,
        message: Option<String>,
    },

    #[error("malformed weather provider response: {0}")]
    Malformed(String),
}

impl LookupError {
    /// Text shown in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Provider {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            LookupError::Provider { .. } => PROVIDER_FALLBACK_MESSAGE.to_string(),
            LookupError::Transport(_) | LookupError::Malformed(_) => FALLBACK_MESSAGE.to_string(),
        }
    }
}
