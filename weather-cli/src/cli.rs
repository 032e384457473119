use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use weather_core::{Config, GetWeatherTool, ToolResult, WeatherService, tool};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Log provider traffic to stderr (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London".
        city: String,

        /// Print the tool result as JSON instead of a sentence.
        #[arg(long)]
        json: bool,
    },

    /// Invoke the get_weather tool with raw JSON arguments, as a host would.
    Call {
        /// Tool arguments, e.g. '{"city":"Paris"}'.
        arguments: String,
    },

    /// Print the tool descriptor (name, description, input schema).
    Schema,

    /// Edit provider endpoints and timeout interactively.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { city, json } => {
                let service = load_service()?;
                let result = match service.get_weather(&city).await {
                    Ok(result) => result,
                    Err(err) if err.is_retryable() => {
                        return Err(anyhow!("{err}\nHint: the provider may be temporarily down; try again."));
                    }
                    Err(err) => return Err(err.into()),
                };

                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print_human(&result);
                }
            }
            Command::Call { arguments } => {
                let arguments: serde_json::Value = serde_json::from_str(&arguments)
                    .context("Tool arguments must be a JSON object")?;
                let tool = GetWeatherTool::new(load_service()?);

                match tool.call(arguments).await {
                    Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                    Err(err) => {
                        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "error": &err }))?);
                        return Err(err.into());
                    }
                }
            }
            Command::Schema => {
                println!("{}", serde_json::to_string_pretty(&tool::descriptor())?);
            }
            Command::Configure => configure()?,
        }

        Ok(())
    }
}

fn load_service() -> anyhow::Result<WeatherService> {
    let config = Config::load()?;
    tracing::debug!(
        geocoding_url = %config.geocoding_url,
        forecast_url = %config.forecast_url,
        timeout_secs = config.timeout_secs,
        "loaded configuration"
    );
    WeatherService::from_config(&config)
}

fn print_human(result: &ToolResult) {
    println!("{}", result.summary());
    if let Some(observed) = result.observed_at {
        println!("Observed at {}", observed.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    }
}

fn configure() -> anyhow::Result<()> {
    let current = Config::load()?;

    let geocoding_url = Text::new("Geocoding search URL:")
        .with_default(&current.geocoding_url)
        .prompt()?;
    let forecast_url = Text::new("Current weather URL:")
        .with_default(&current.forecast_url)
        .prompt()?;
    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(current.timeout_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;
    let language = Text::new("Place name language:")
        .with_default(&current.language)
        .prompt()?;

    let updated = Config { geocoding_url, forecast_url, timeout_secs, language, ..current };
    updated.validate()?;
    let path = updated.save()?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_json_flag() {
        let cli = Cli::try_parse_from(["weather", "show", "New York", "--json"]).unwrap();
        match cli.command {
            Command::Show { city, json } => {
                assert_eq!(city, "New York");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["weather", "schema", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn show_requires_city() {
        assert!(Cli::try_parse_from(["weather", "show"]).is_err());
    }
}
