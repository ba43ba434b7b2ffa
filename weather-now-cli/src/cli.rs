use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, InquireError, Text};
use std::process::ExitCode;
use weather_now_core::{Config, OpenMeteoProvider, SearchState, WeatherLookup, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-now",
    version,
    about = "Current conditions and a 24-hour outlook for any city"
)]
pub struct Cli {
    #[command(flatten)]
    pub endpoints: EndpointArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// One-off overrides of the saved configuration.
#[derive(Debug, Args)]
pub struct EndpointArgs {
    /// Geocoding service base URL.
    #[arg(long, global = true)]
    pub geocoding_url: Option<String>,

    /// Forecast service base URL.
    #[arg(long, global = true)]
    pub forecast_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the endpoints and timeout used for lookups.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name, e.g. "Kakinada" or "New York".
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,

        /// Print the search state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Keep prompting for cities until Esc or Ctrl-C.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let EndpointArgs {
            geocoding_url,
            forecast_url,
            timeout,
        } = self.endpoints;
        let config = resolve_config(Config::load(), &self.command)?.with_overrides(
            geocoding_url,
            forecast_url,
            timeout,
        );
        tracing::debug!(?config, "configuration loaded");

        match self.command {
            Command::Configure => {
                configure(config)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, json } => show(&config, &city.join(" "), json).await,
            Command::Interactive => {
                interactive(&config).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// `configure` must still work when the saved file is broken, since it rewrites it.
fn resolve_config(loaded: Result<Config>, command: &Command) -> Result<Config> {
    match loaded {
        Ok(config) => Ok(config),
        Err(e) if matches!(command, Command::Configure) => {
            tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable configuration");
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

fn exit_code(state: &SearchState) -> ExitCode {
    match state {
        SearchState::Error { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

fn new_lookup(config: &Config) -> Result<WeatherLookup<OpenMeteoProvider>> {
    config.validate()?;
    Ok(WeatherLookup::new(OpenMeteoProvider::new(config)?))
}

async fn show(config: &Config, query: &str, json: bool) -> Result<ExitCode> {
    let mut lookup = new_lookup(config)?;
    let state = lookup.search(query).await;

    if json {
        let out = serde_json::to_string_pretty(state).context("Failed to serialize search result")?;
        println!("{out}");
    } else {
        print_state(state);
    }

    Ok(exit_code(state))
}

async fn interactive(config: &Config) -> Result<()> {
    let mut lookup = new_lookup(config)?;
    print_state(lookup.state());

    loop {
        let query = match Text::new("City name:")
            .with_placeholder("e.g. Hyderabad, Amalapuram, Kakinada")
            .with_help_message("Esc or Ctrl-C to quit")
            .prompt()
        {
            Ok(query) => query,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        print_state(&SearchState::Loading);
        print_state(lookup.search(&query).await);
        println!();
    }

    Ok(())
}

fn configure(current: Config) -> Result<()> {
    let geocoding_base_url = Text::new("Geocoding base URL:")
        .with_default(&current.geocoding_base_url)
        .prompt()?;

    let forecast_base_url = Text::new("Forecast base URL:")
        .with_default(&current.forecast_base_url)
        .prompt()?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(current.timeout_secs)
        .with_error_message("Please type a whole number of seconds")
        .prompt()?;

    let config = Config {
        geocoding_base_url,
        forecast_base_url,
        timeout_secs,
    };
    config.validate()?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

fn print_state(state: &SearchState) {
    let text = render::render_state(state);
    match state {
        SearchState::Error { .. } => eprint!("{text}"),
        _ => print!("{text}"),
    }
}
