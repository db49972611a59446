use crate::{
    Config,
    model::{CurrentConditions, ForecastEntry},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;

pub mod locate;
pub mod openweather;

/// Failure of a single provider request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to send {endpoint} request: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {endpoint} response: {source}")]
    Parse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} response is missing {field}")]
    Missing {
        endpoint: &'static str,
        field: &'static str,
    },
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, FetchError>;

    /// Forecast samples in provider order.
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError>;
}

/// Issue both requests for `city` concurrently and wait for both.
pub async fn fetch_both<P>(
    provider: &P,
    city: &str,
) -> Result<(CurrentConditions, Vec<ForecastEntry>), FetchError>
where
    P: WeatherProvider + ?Sized,
{
    tokio::try_join!(provider.fetch_current(city), provider.fetch_forecast(city))
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    let timeout = config.timeout_secs.map(Duration::from_secs);

    let provider = OpenWeatherProvider::new(api_key, config.base_url.clone(), timeout)?;
    Ok(Box::new(provider))
}
