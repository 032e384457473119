use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{CityQuery, GeoLocation, validate_coordinates},
};

use super::{Geocoder, transport_error, truncate_body};

const PROVIDER: &str = "geocoding";

/// Open-Meteo geocoding search (`/v1/search`).
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    url: String,
    language: String,
    count: u32,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, url: String, language: String, count: u32) -> Self {
        Self { http, url, language, count: count.max(1) }
    }
}

#[derive(Debug, Deserialize)]
struct OmSearchResponse {
    // Absent, null or empty when nothing matched.
    #[serde(default)]
    results: Option<Vec<OmPlace>>,
}

#[derive(Debug, Deserialize)]
struct OmPlace {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn resolve(&self, city: &CityQuery) -> Result<GeoLocation, WeatherError> {
        let count = self.count.to_string();
        tracing::debug!(%city, url = %self.url, "geocoding lookup");

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("name", city.as_str()),
                ("count", count.as_str()),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, &e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| transport_error(PROVIDER, &e))?;

        if !status.is_success() {
            tracing::warn!(%status, "geocoding request failed");
            return Err(WeatherError::upstream(
                PROVIDER,
                format!("status {status}: {}", truncate_body(&body)),
            ));
        }

        // A garbled geocoding payload is reported as an upstream outage, not a schema bug.
        let parsed: OmSearchResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherError::upstream(PROVIDER, format!("unparseable response: {e}"))
        })?;

        let place = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound { query: city.to_string() })?;

        validate_coordinates(place.latitude, place.longitude).map_err(|e| {
            WeatherError::upstream(PROVIDER, format!("match for '{city}' has bad coordinates: {e}"))
        })?;

        let location = GeoLocation {
            canonical_name: place.name,
            latitude: place.latitude,
            longitude: place.longitude,
            country: place.country,
            admin1: place.admin1,
        };
        tracing::info!(
            query = %city,
            resolved = %location.display_name(),
            lat = location.latitude,
            lon = location.longitude,
            "resolved city"
        );
        Ok(location)
    }
}
