//! Core library for the `geocode` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The Bing Maps Locations provider
//! - Shared domain models (requests, matches, output modes)
//! - Rendering of matches as text lines or map URLs
//!
//! It is used by `geocode-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;

pub use config::{Config, ProviderConfig};
pub use error::{GeocodeError, NO_RESULTS_NOTICE};
pub use model::{GeocodeRequest, LocationMatch, OutputMode};
pub use provider::{GeocodeProvider, ProviderId, bing::BingMapsProvider};

use std::io::Write;

/// Look up an address and render one line per match, in provider order.
///
/// On zero matches the fixed notice is printed to stdout before returning
/// [`GeocodeError::NoResults`]; scripts scrape that line.
pub async fn lookup(
    provider: &dyn GeocodeProvider,
    request: &GeocodeRequest,
) -> Result<Vec<String>, GeocodeError> {
    lookup_with_notices(provider, request, &mut std::io::stdout()).await
}

/// Same as [`lookup`], with the zero-results notice written to `notices`.
pub async fn lookup_with_notices<W: Write>(
    provider: &dyn GeocodeProvider,
    request: &GeocodeRequest,
    notices: &mut W,
) -> Result<Vec<String>, GeocodeError> {
    match provider.locate(request).await {
        Ok(matches) => {
            tracing::info!(
                provider = %provider.id(),
                output_mode = request.output_mode.as_str(),
                count = matches.len(),
                "Geocoded address"
            );
            Ok(matches.iter().map(|m| request.output_mode.render(m)).collect())
        }
        Err(GeocodeError::NoResults) => {
            let _ = writeln!(notices, "{NO_RESULTS_NOTICE}");
            Err(GeocodeError::NoResults)
        }
        Err(err) => Err(err),
    }
}

/// One-shot convenience: geocode `address` against Bing Maps with an explicit key.
pub async fn geocode(
    address: &str,
    api_key: &str,
    include_neighbourhood: bool,
    max_results: u32,
    output_mode: OutputMode,
) -> Result<Vec<String>, GeocodeError> {
    let request = GeocodeRequest::new(address)?
        .with_neighbourhood(include_neighbourhood)
        .with_max_results(max_results)
        .with_output_mode(output_mode);

    let provider = BingMapsProvider::new(api_key.to_string());
    lookup(&provider, &request).await
}
