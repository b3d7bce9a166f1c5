use crate::{
    Config,
    error::WeatherError,
    model::{CurrentPayload, ForecastPayload},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of raw weather payloads for a named city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<CurrentPayload, WeatherError>;

    async fn forecast(&self, city: &str) -> Result<ForecastPayload, WeatherError>;
}

/// Construct the OpenWeather provider from config, taking the API key from
/// the environment when it is set there.
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider, WeatherError> {
    let api_key = config.api_key_from_env()?;
    provider_with_key(config, api_key)
}

pub fn provider_with_key(
    config: &Config,
    api_key: String,
) -> Result<OpenWeatherProvider, WeatherError> {
    OpenWeatherProvider::with_base_url(api_key, config.api_base_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_uses_configured_base_url() {
        let cfg = Config {
            api_base_url: Some("http://localhost:9000/".into()),
            ..Config::default()
        };

        let provider = provider_with_key(&cfg, "KEY".into()).expect("provider builds");
        assert_eq!(provider.base_url(), "http://localhost:9000");
    }

    #[test]
    fn provider_defaults_to_openweather() {
        let provider = provider_with_key(&Config::default(), "KEY".into()).expect("provider builds");
        assert_eq!(provider.base_url(), crate::config::DEFAULT_API_BASE_URL);
    }
}
