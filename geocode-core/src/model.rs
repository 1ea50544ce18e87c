use serde_json::Number;

use crate::error::GeocodeError;

/// Default number of matches requested when the caller does not say otherwise.
pub const DEFAULT_MAX_RESULTS: u32 = 1;

/// How each match is rendered into an output line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Structured `lat:long,bbox,confidence,type,codes,address` text.
    #[default]
    None,
    OpenStreetMap,
    Bing,
    Google,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::None => "none",
            OutputMode::OpenStreetMap => "openstreetmap",
            OutputMode::Bing => "bing",
            OutputMode::Google => "google",
        }
    }
}

/// A single address lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeRequest {
    pub address: String,
    pub include_neighbourhood: bool,
    /// Passed through to the provider unchecked; it accepts 1..=20.
    pub max_results: u32,
    pub output_mode: OutputMode,
}

impl GeocodeRequest {
    /// Build a request with defaults. Fails when the address is blank.
    pub fn new(address: impl Into<String>) -> Result<Self, GeocodeError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(GeocodeError::InvalidRequest(
                "address must not be empty".to_string(),
            ));
        }

        Ok(Self {
            address,
            include_neighbourhood: false,
            max_results: DEFAULT_MAX_RESULTS,
            output_mode: OutputMode::None,
        })
    }

    pub fn with_neighbourhood(mut self, include: bool) -> Self {
        self.include_neighbourhood = include;
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }
}

/// One candidate location returned by the provider.
///
/// Coordinates are kept as JSON numbers so they print exactly as the provider
/// wrote them: `151` stays `151` and `151.0` stays `151.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMatch {
    pub latitude: Number,
    pub longitude: Number,
    /// South, west, north, east as returned by the provider.
    pub bounding_box: [Number; 4],
    pub confidence: String,
    pub entity_type: String,
    pub match_codes: Vec<String>,
    pub formatted_address: String,
    pub country_region: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_address_is_rejected() {
        let err = GeocodeRequest::new("   \t").unwrap_err();
        assert!(matches!(err, GeocodeError::InvalidRequest(_)));
    }

    #[test]
    fn request_defaults() {
        let req = GeocodeRequest::new("Sydney Opera House").unwrap();
        assert_eq!(req.address, "Sydney Opera House");
        assert!(!req.include_neighbourhood);
        assert_eq!(req.max_results, 1);
        assert_eq!(req.output_mode, OutputMode::None);
    }

    #[test]
    fn builders_override_defaults() {
        let req = GeocodeRequest::new("Uluru")
            .unwrap()
            .with_neighbourhood(true)
            .with_max_results(20)
            .with_output_mode(OutputMode::Bing);

        assert!(req.include_neighbourhood);
        assert_eq!(req.max_results, 20);
        assert_eq!(req.output_mode.as_str(), "bing");
    }
}
