use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, Timelike};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, OpenWeatherProvider, QueryController, QueryState, WeatherReport, fetch_report,
    present::viewer_locale, provider::provider_from_config,
};

use crate::render::Renderer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 5-day forecast by city")]
pub struct Cli {
    /// Disable theme colours.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show weather for a single city and exit.
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: String,
    },

    /// Prompt for city names until cancelled (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => show(&city, !self.no_color).await,
            Some(Command::Interactive) | None => interactive(!self.no_color).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    let path = config.save()?;
    println!("Saved API key to {}", path.display());
    Ok(())
}

fn setup(color: bool) -> anyhow::Result<(QueryController<OpenWeatherProvider>, Renderer)> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let locale = viewer_locale();
    tracing::debug!(base_url = provider.base_url(), ?locale, "config loaded");

    let renderer = Renderer {
        icon_base_url: config.icon_base_url().to_string(),
        color,
    };
    let controller = QueryController::new(Arc::new(provider)).with_locale(locale);
    Ok((controller, renderer))
}

fn local_hour() -> u32 {
    Local::now().hour()
}

async fn show(city: &str, color: bool) -> anyhow::Result<()> {
    let (mut controller, renderer) = setup(color)?;

    controller.submit_query(city).await;

    let state = controller.state();
    finished_report(state)?;
    println!("{}", renderer.render(state, state.theme_at(local_hour())));
    Ok(())
}

/// The report of a finished one-shot lookup, or the reason there is none.
fn finished_report(state: &QueryState) -> anyhow::Result<&WeatherReport> {
    if let Some(err) = state.error() {
        anyhow::bail!("{err}");
    }
    state
        .report()
        .ok_or_else(|| anyhow::anyhow!("City name must not be empty"))
}

async fn interactive(color: bool) -> anyhow::Result<()> {
    let (mut controller, renderer) = setup(color)?;
    let provider = controller.provider();

    loop {
        let city = match Text::new("City:").with_placeholder("Enter city name").prompt() {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                tracing::debug!("city prompt cancelled, leaving interactive mode");
                break;
            }
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        let Some(ticket) = controller.begin(&city) else {
            continue;
        };
        println!("{}", renderer.render(controller.state(), None));

        let city = controller.state().city_input.clone();
        let outcome = fetch_report(provider.as_ref(), &city, controller.locale()).await;
        controller.complete(ticket, outcome);

        let state = controller.state();
        println!("{}", renderer.render(state, state.theme_at(local_hour())));
    }

    Ok(())
}
