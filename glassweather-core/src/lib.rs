//! Core library for the `glassweather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeather implementation
//! - Search history persisted in a key/value store
//! - The render pipeline and weather-themed backdrop, behind a presentation port
//! - The dashboard orchestrating all of the above
//!
//! It is used by `glassweather-cli`, but any [`Presenter`] can drive it.

pub mod config;
pub mod dashboard;
pub mod history;
pub mod model;
pub mod provider;
pub mod render;
pub mod store;
pub mod theme;

pub use config::Config;
pub use dashboard::{Dashboard, QueryOutcome, Session};
pub use history::HistoryStore;
pub use model::{CurrentConditions, ForecastEntry};
pub use provider::{FetchError, WeatherProvider};
pub use render::Presenter;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use theme::Theme;
