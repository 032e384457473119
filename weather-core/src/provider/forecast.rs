use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{WeatherReading, validate_coordinates},
};

use super::{WeatherFetcher, transport_error, truncate_body};

const PROVIDER: &str = "forecast";

/// Open-Meteo current conditions (`/v1/forecast?current_weather=true`).
#[derive(Debug, Clone)]
pub struct OpenMeteoFetcher {
    http: Client,
    url: String,
}

impl OpenMeteoFetcher {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current_weather: Option<OmCurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: Option<f64>,
    windspeed: Option<f64>,
    time: Option<String>,
}

#[async_trait]
impl WeatherFetcher for OpenMeteoFetcher {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReading, WeatherError> {
        validate_coordinates(latitude, longitude)?;
        tracing::debug!(lat = latitude, lon = longitude, url = %self.url, "current weather lookup");

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, &e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| transport_error(PROVIDER, &e))?;

        if !status.is_success() {
            tracing::warn!(%status, "weather request failed");
            return Err(WeatherError::upstream(
                PROVIDER,
                format!("status {status}: {}", truncate_body(&body)),
            ));
        }

        let parsed: OmForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(PROVIDER, format!("invalid JSON: {e}")))?;

        let current = parsed
            .current_weather
            .ok_or_else(|| WeatherError::malformed(PROVIDER, "missing current_weather"))?;

        let temperature_c = current
            .temperature
            .ok_or_else(|| WeatherError::malformed(PROVIDER, "missing current_weather.temperature"))?;
        let wind_speed_kph = current
            .windspeed
            .ok_or_else(|| WeatherError::malformed(PROVIDER, "missing current_weather.windspeed"))?;

        let reading = WeatherReading {
            temperature_c,
            wind_speed_kph,
            observed_at: current.time.as_deref().and_then(parse_observation_time),
        };
        tracing::info!(
            temperature_c = reading.temperature_c,
            wind_speed_kph = reading.wind_speed_kph,
            "fetched current weather"
        );
        Ok(reading)
    }
}

/// Open-Meteo reports `YYYY-MM-DDTHH:MM` in GMT unless a timezone is requested.
fn parse_observation_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .ok()
        .map(|ndt| ndt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_minute_precision_timestamps() {
        let parsed = parse_observation_time("2024-03-05T14:15");
        assert_eq!(parsed, Some(Utc.with_ymd_and_hms(2024, 3, 5, 14, 15, 0).unwrap()));
    }

    #[test]
    fn unparseable_time_is_dropped() {
        assert_eq!(parse_observation_time("yesterday"), None);
    }

    #[tokio::test]
    async fn out_of_range_coordinates_fail_before_request() {
        // Nothing listens on this port; reaching the network would be UpstreamUnavailable.
        let fetcher = OpenMeteoFetcher::new(Client::new(), "http://127.0.0.1:9/v1/forecast".into());
        let err = fetcher.fetch(91.0, 0.0).await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidInput(_)), "got {err:?}");
    }
}
