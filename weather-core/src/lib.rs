//! Core library for the `get_weather` tool.
//!
//! This crate defines:
//! - The error taxonomy surfaced to callers
//! - Configuration of provider endpoints and timeouts
//! - `Geocoder` / `WeatherFetcher` capabilities and their Open-Meteo clients
//! - The `WeatherService` orchestrator and the JSON tool adapter
//!
//! It is used by `weather-cli`, but any tool host can embed it.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;
pub mod tool;

pub use config::Config;
pub use error::{ErrorKind, WeatherError};
pub use model::{CityQuery, GeoLocation, ToolResult, WeatherReading};
pub use provider::{Geocoder, WeatherFetcher};
pub use service::WeatherService;
pub use tool::{GetWeatherTool, ToolDescriptor, ToolError};
