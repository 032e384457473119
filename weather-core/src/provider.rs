use crate::{
    Config, GeoLocation, WeatherError, WeatherReading,
    model::CityQuery,
    provider::{forecast::OpenMeteoFetcher, geocoding::OpenMeteoGeocoder},
};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

pub mod forecast;
pub mod geocoding;

pub const USER_AGENT: &str = concat!("weather-core/", env!("CARGO_PKG_VERSION"));

/// Resolves a city name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// Best match for `city`, taking the provider's first result.
    async fn resolve(&self, city: &CityQuery) -> Result<GeoLocation, WeatherError>;
}

/// Fetches current conditions for a coordinate.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    /// Implementations must re-check coordinate bounds before any request.
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReading, WeatherError>;
}

/// Shared HTTP client with the configured per-request timeout.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))
}

/// Construct both Open-Meteo collaborators from config, sharing one client.
pub fn providers_from_config(
    config: &Config,
) -> anyhow::Result<(Box<dyn Geocoder>, Box<dyn WeatherFetcher>)> {
    config.validate()?;
    let http = http_client(config)?;

    let geocoder = OpenMeteoGeocoder::new(
        http.clone(),
        config.geocoding_url.clone(),
        config.language.clone(),
        config.result_count,
    );
    let fetcher = OpenMeteoFetcher::new(http, config.forecast_url.clone());

    Ok((Box::new(geocoder), Box::new(fetcher)))
}

/// Maps a reqwest failure (connect, timeout, body read) to `UpstreamUnavailable`.
pub(crate) fn transport_error(provider: &'static str, err: &reqwest::Error) -> WeatherError {
    let reason = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else {
        err.to_string()
    };
    tracing::warn!(provider, %reason, "upstream request failed");
    WeatherError::upstream(provider, reason)
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
