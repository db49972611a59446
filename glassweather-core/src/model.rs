use serde::{Deserialize, Serialize};

/// Format of the provider's `dt_txt` forecast timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current conditions for one city, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    /// Primary condition label, e.g. "Rain" or "Clouds".
    pub condition: String,
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,

    /// ISO country code, when the provider reports one.
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub feels_like_c: Option<f64>,
    #[serde(default)]
    pub pressure_hpa: Option<f64>,
    #[serde(default)]
    pub visibility_m: Option<f64>,
}

/// One 3-hour forecast sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Provider timestamp, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub condition: String,
    pub temperature_c: f64,
}

impl ForecastEntry {
    /// Calendar date part of the timestamp (its first 10 characters).
    pub fn date(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }
}
