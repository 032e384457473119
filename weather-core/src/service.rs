use crate::{
    Config, ToolResult, WeatherError,
    model::CityQuery,
    provider::{Geocoder, WeatherFetcher, providers_from_config},
};

/// Resolve-then-fetch pipeline behind the `get_weather` tool.
///
/// Stateless between calls: every invocation geocodes and fetches anew, with
/// no caching and no retry. Errors from either stage are returned unchanged.
#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    fetcher: Box<dyn WeatherFetcher>,
}

impl WeatherService {
    pub fn new(geocoder: Box<dyn Geocoder>, fetcher: Box<dyn WeatherFetcher>) -> Self {
        Self { geocoder, fetcher }
    }

    /// Service wired to the Open-Meteo providers described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let (geocoder, fetcher) = providers_from_config(config)?;
        Ok(Self::new(geocoder, fetcher))
    }

    pub async fn get_weather(&self, city: &str) -> Result<ToolResult, WeatherError> {
        let query = CityQuery::parse(city)?;
        let location = self.geocoder.resolve(&query).await?;
        let reading = self.fetcher.fetch(location.latitude, location.longitude).await?;
        Ok(ToolResult::from_parts(&location, &reading))
    }
}
