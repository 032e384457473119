//! The `get_weather` tool as seen by an invoking host.
//!
//! Hosts speak JSON: they list the [`ToolDescriptor`] and call
//! [`GetWeatherTool::call`] with raw arguments. Transport and framing are the
//! host's business.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::Instrument;

use crate::{
    WeatherService,
    error::{ErrorKind, WeatherError},
};

pub const TOOL_NAME: &str = "get_weather";
pub const TOOL_DESCRIPTION: &str = "Get the current weather for a given city.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: TOOL_DESCRIPTION.to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name to look up, e.g. \"London\""
                }
            },
            "required": ["city"]
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct GetWeatherParams {
    pub city: String,
}

/// Error object returned to the host; one per failed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl From<WeatherError> for ToolError {
    fn from(err: WeatherError) -> Self {
        Self { kind: err.kind(), retryable: err.is_retryable(), message: err.to_string() }
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl std::error::Error for ToolError {}

#[derive(Debug)]
pub struct GetWeatherTool {
    service: WeatherService,
}

impl GetWeatherTool {
    pub fn new(service: WeatherService) -> Self {
        Self { service }
    }

    /// Invoke with host-supplied JSON arguments, returning the serialized result.
    pub async fn call(&self, arguments: Value) -> Result<Value, ToolError> {
        let params: GetWeatherParams = serde_json::from_value(arguments).map_err(|e| {
            ToolError::from(WeatherError::invalid_input(format!("bad arguments: {e}")))
        })?;

        let span = tracing::info_span!("tool_call", tool = TOOL_NAME, city = %params.city);

        match self.service.get_weather(&params.city).instrument(span).await {
            Ok(result) => serde_json::to_value(&result).map_err(|e| ToolError {
                kind: ErrorKind::Internal,
                message: format!("failed to serialize result: {e}"),
                retryable: false,
            }),
            Err(err) => {
                tracing::warn!(kind = %err.kind(), error = %err, "get_weather failed");
                Err(err.into())
            }
        }
    }
}
