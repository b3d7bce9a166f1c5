use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while looking up weather for a city.
///
/// The `Display` text of each variant is what the user ends up seeing in
/// the error region, so keep the messages short.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The current-weather endpoint answered with a non-success status.
    #[error("City not found")]
    CityNotFound,

    /// The forecast endpoint answered with a non-success status.
    #[error("Forecast unavailable (status {0})")]
    ForecastUnavailable(StatusCode),

    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse weather data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "No OpenWeather API key configured.\n\
         Hint: run `weather configure` or set OPENWEATHER_API_KEY."
    )]
    MissingApiKey,
}

impl WeatherError {
    /// True for transport and decoding failures, as opposed to the
    /// provider rejecting the request.
    pub fn is_network_or_parse(&self) -> bool {
        matches!(self, WeatherError::Request(_) | WeatherError::Parse(_))
    }
}
