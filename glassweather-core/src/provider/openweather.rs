use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    model::{CurrentConditions, ForecastEntry},
    render::DAILY_MARKER,
};

use super::{FetchError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const CURRENT: &str = "weather";
const FORECAST: &str = "forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        city: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, city, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Request { endpoint, source })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| FetchError::Parse { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    #[serde(default)]
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
    #[serde(default)]
    visibility: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_weather(
    endpoint: &'static str,
    weather: Vec<OwWeather>,
) -> Result<OwWeather, FetchError> {
    weather.into_iter().next().ok_or(FetchError::Missing {
        endpoint,
        field: "weather[0]",
    })
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, FetchError> {
        let parsed: OwCurrentResponse = self.get_json(CURRENT, city).await?;
        let weather = first_weather(CURRENT, parsed.weather)?;

        Ok(CurrentConditions {
            city: parsed.name,
            condition: weather.main,
            description: weather.description,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            country: parsed.sys.country,
            feels_like_c: parsed.main.feels_like,
            pressure_hpa: parsed.main.pressure,
            visibility_m: parsed.visibility,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let parsed: OwForecastResponse = self.get_json(FORECAST, city).await?;

        parsed
            .list
            .into_iter()
            .map(|entry| -> Result<ForecastEntry, FetchError> {
                // Only daily samples drive cards, so only they need a condition.
                let condition = if entry.dt_txt.contains(DAILY_MARKER) {
                    first_weather(FORECAST, entry.weather)?.main
                } else {
                    entry.weather.into_iter().next().map(|w| w.main).unwrap_or_default()
                };

                Ok(ForecastEntry {
                    timestamp: entry.dt_txt,
                    condition,
                    temperature_c: entry.main.temp,
                })
            })
            .collect()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
