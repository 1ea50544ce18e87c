use crate::{
    Config, GeocodeError, GeocodeRequest, LocationMatch, provider::bing::BingMapsProvider,
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, time::Duration};

pub mod bing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Bing,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Bing => "bing",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = GeocodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "bing" => Ok(ProviderId::Bing),
            _ => Err(GeocodeError::Config(format!(
                "Unknown provider '{value}'. Supported providers: bing."
            ))),
        }
    }
}

/// A geocoding service that resolves one address into candidate locations.
#[async_trait]
pub trait GeocodeProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    /// Issue one request and return matches in provider order.
    ///
    /// Returns [`GeocodeError::NoResults`] when the provider reports zero candidates.
    async fn locate(&self, request: &GeocodeRequest) -> Result<Vec<LocationMatch>, GeocodeError>;
}

/// Construct a provider from config and explicit ProviderId.
pub fn provider_from_config(
    id: ProviderId,
    config: &Config,
) -> Result<Box<dyn GeocodeProvider>, GeocodeError> {
    let api_key = config.api_key(id)?;

    let boxed: Box<dyn GeocodeProvider> = match id {
        ProviderId::Bing => {
            let mut provider = BingMapsProvider::new(api_key.to_owned());
            if let Some(endpoint) = &config.endpoint {
                provider = provider.with_endpoint(endpoint.clone());
            }
            if let Some(secs) = config.timeout_secs {
                provider = provider.with_timeout(Duration::from_secs(secs));
            }
            Box::new(provider)
        }
    };

    Ok(boxed)
}
