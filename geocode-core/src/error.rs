use thiserror::Error;

/// Notice printed to stdout when the provider reports zero candidate matches.
pub const NO_RESULTS_NOTICE: &str = "No locations identified from the provided address.";

/// Everything that can go wrong between taking an address and returning rendered lines.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Missing or unreadable credential/configuration.
    #[error("{0}")]
    Config(String),

    #[error("Invalid geocode request: {0}")]
    InvalidRequest(String),

    /// The request could not be completed, or the provider answered with a non-success status.
    #[error("Bing Maps request failed: {0}")]
    Transport(String),

    /// The provider rejected the API key (HTTP 401/403).
    #[error("The Bing Maps key is invalid: {0}")]
    InvalidKey(String),

    /// The response body was not JSON, or did not have the expected shape.
    #[error("Failed to parse Bing Maps response at `{field}`: {message}")]
    Parse { field: String, message: String },

    #[error("{NO_RESULTS_NOTICE}")]
    NoResults,
}

impl GeocodeError {
    pub(crate) fn parse(field: impl Into<String>, message: impl ToString) -> Self {
        GeocodeError::Parse {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Whether the CLI should point the user at `geocode configure`.
    /// Config errors carry their own hint.
    pub fn suggests_reconfigure(&self) -> bool {
        matches!(self, GeocodeError::InvalidKey(_) | GeocodeError::Transport(_))
    }
}
