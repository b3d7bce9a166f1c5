use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::DEFAULT_API_BASE_URL,
    error::WeatherError,
    model::{CurrentPayload, ForecastPayload},
};

use super::WeatherProvider;

/// Client for the OpenWeather 2.5 REST API (current weather and 5 day / 3 hour forecast).
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, WeatherError> {
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::builder().build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, endpoint: &str, city: &str) -> Result<Response, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, city, "requesting OpenWeather {endpoint}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        tracing::debug!(status = %res.status(), "OpenWeather {endpoint} responded");
        Ok(res)
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, WeatherError> {
    let body = res.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<CurrentPayload, WeatherError> {
        let res = self.get("weather", city).await?;

        if !res.status().is_success() {
            tracing::debug!(city, status = %res.status(), "current weather rejected");
            return Err(WeatherError::CityNotFound);
        }

        decode(res).await
    }

    async fn forecast(&self, city: &str) -> Result<ForecastPayload, WeatherError> {
        let res = self.get("forecast", city).await?;

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(city, %status, "forecast rejected");
            return Err(WeatherError::ForecastUnavailable(status));
        }

        decode(res).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let provider =
            OpenWeatherProvider::with_base_url("KEY".into(), "http://example.test/api//")
                .expect("provider builds");
        assert_eq!(provider.base_url(), "http://example.test/api");
    }

    #[test]
    fn new_points_at_openweather() {
        let provider = OpenWeatherProvider::new("KEY".into()).expect("provider builds");
        assert_eq!(provider.base_url(), DEFAULT_API_BASE_URL);
    }
}
