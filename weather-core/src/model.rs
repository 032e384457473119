use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// A caller-supplied city name, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn parse(raw: &str) -> Result<Self, WeatherError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(WeatherError::invalid_input("city name must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Best geocoding match for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub canonical_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    /// First-level administrative area (state, region).
    pub admin1: Option<String>,
}

impl GeoLocation {
    /// "Springfield, Illinois, United States" style label for disambiguation.
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.canonical_name.as_str()];
        parts.extend(self.admin1.as_deref());
        parts.extend(self.country.as_deref());
        parts.join(", ")
    }
}

/// Fails with `InvalidInput` unless both values are finite and within geographic bounds.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(WeatherError::invalid_input(format!(
            "latitude {latitude} outside [-90, 90]"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(WeatherError::invalid_input(format!(
            "longitude {longitude} outside [-180, 180]"
        )));
    }
    Ok(())
}

/// Current conditions as reported by the weather provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub wind_speed_kph: f64,
    pub observed_at: Option<DateTime<Utc>>,
}

/// The externally visible result of `get_weather`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    /// Canonical name from geocoding, not the raw query.
    pub city: String,
    pub temperature: f64,
    pub wind_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

impl ToolResult {
    pub fn from_parts(location: &GeoLocation, reading: &WeatherReading) -> Self {
        Self {
            city: location.canonical_name.clone(),
            temperature: reading.temperature_c,
            wind_speed: reading.wind_speed_kph,
            observed_at: reading.observed_at,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Current weather in {}: {}°C, Wind: {}km/h",
            self.city, self.temperature, self.wind_speed
        )
    }
}
