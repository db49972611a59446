//! Render pipeline: decides what to show and hands it to a [`Presenter`].
//!
//! The helpers returning view values (`current_panel`, `daily_forecast`,
//! `chart_series`, `day_ranges`) are pure. The `render_*` functions are the
//! only place that talks to the presentation port.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::{
    model::{CurrentConditions, ForecastEntry, TIMESTAMP_FORMAT},
    theme::{Decoration, Theme},
};

/// Marker selecting one sample per day from the 3-hourly forecast.
///
/// A day whose noon sample is missing or shifted (e.g. around daylight
/// saving changes in some provider regions) is silently skipped.
pub const DAILY_MARKER: &str = "12:00";

/// Number of forecast samples in the chart: 8 x 3h = the next 24 hours.
pub const CHART_WINDOW: usize = 8;

pub const CHART_LABEL: &str = "Temperature (°C)";

/// Days covered by [`day_ranges`].
pub const RANGE_DAYS: usize = 5;

/// Display surface for the dashboard.
///
/// Implementations own every visible side effect; the core never writes to
/// a terminal or a page directly.
pub trait Presenter {
    /// Replace the current-conditions panel.
    fn show_current(&mut self, panel: &CurrentPanel);

    fn clear_forecast(&mut self);

    fn push_forecast_card(&mut self, card: &ForecastCard);

    fn show_day_ranges(&mut self, _ranges: &[DayRange]) {}

    fn draw_chart(&mut self, series: &ChartSeries) -> ChartHandle;

    fn dispose_chart(&mut self, handle: ChartHandle);

    /// Remove the decorations of every theme.
    fn clear_decorations(&mut self);

    fn show_backdrop(&mut self, theme: Theme, decorations: &[Decoration]);

    /// Replace the list of selectable history entries.
    fn show_history(&mut self, cities: &[String]);
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPanel {
    pub city: String,
    pub summary: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
}

impl CurrentPanel {
    pub fn lines(&self) -> [&str; 5] {
        [
            &self.city,
            &self.summary,
            &self.temperature,
            &self.humidity,
            &self.wind,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub date: String,
    pub condition: String,
    pub temperature: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Opaque handle to a chart drawn by a [`Presenter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct DayRange {
    pub date: String,
    pub min_c: f64,
    pub max_c: f64,
}

pub fn current_panel(conditions: &CurrentConditions) -> CurrentPanel {
    CurrentPanel {
        city: conditions.city.clone(),
        summary: format!("{} - {}", conditions.condition, conditions.description),
        temperature: format!("Temperature: {}°C", conditions.temperature_c),
        humidity: format!("Humidity: {}%", conditions.humidity_pct),
        wind: format!("Wind: {} m/s", conditions.wind_speed_mps),
    }
}

/// Detail lines for a favorite city: the current panel plus the optional
/// fields the provider reported. Absent fields are left out.
pub fn favorite_summary(conditions: &CurrentConditions) -> Vec<String> {
    let heading = match &conditions.country {
        Some(country) => format!("{}, {country}", conditions.city),
        None => conditions.city.clone(),
    };

    let mut lines = vec![
        heading,
        format!("{} - {}", conditions.condition, conditions.description),
        format!("Temperature: {}°C", conditions.temperature_c),
    ];
    if let Some(feels_like) = conditions.feels_like_c {
        lines.push(format!("Feels like: {feels_like}°C"));
    }
    lines.push(format!("Humidity: {}%", conditions.humidity_pct));
    if let Some(pressure) = conditions.pressure_hpa {
        lines.push(format!("Pressure: {pressure} hPa"));
    }
    if let Some(visibility) = conditions.visibility_m {
        lines.push(format!("Visibility: {visibility} m"));
    }
    lines.push(format!("Wind: {} m/s", conditions.wind_speed_mps));
    lines
}

/// Entries sampled at local noon, in input order.
pub fn daily_forecast(entries: &[ForecastEntry]) -> impl Iterator<Item = &ForecastEntry> {
    entries
        .iter()
        .filter(|entry| entry.timestamp.contains(DAILY_MARKER))
}

pub fn forecast_card(entry: &ForecastEntry) -> ForecastCard {
    ForecastCard {
        date: entry.date().to_string(),
        condition: entry.condition.clone(),
        temperature: format!("{}°C", entry.temperature_c),
    }
}

/// Chart data for the first [`CHART_WINDOW`] entries.
pub fn chart_series(entries: &[ForecastEntry]) -> ChartSeries {
    let window = &entries[..entries.len().min(CHART_WINDOW)];

    ChartSeries {
        label: CHART_LABEL,
        labels: window.iter().map(|e| e.timestamp.clone()).collect(),
        values: window.iter().map(|e| e.temperature_c).collect(),
    }
}

/// Min/max temperature per date for the first [`RANGE_DAYS`] dates.
pub fn day_ranges(entries: &[ForecastEntry]) -> Vec<DayRange> {
    let mut by_date: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

    for entry in entries {
        let t = entry.temperature_c;
        by_date
            .entry(entry.date())
            .and_modify(|(min, max)| {
                *min = min.min(t);
                *max = max.max(t);
            })
            .or_insert((t, t));
    }

    by_date
        .into_iter()
        .take(RANGE_DAYS)
        .map(|(date, (min, max))| DayRange {
            date: date.to_string(),
            min_c: round1(min),
            max_c: round1(max),
        })
        .collect()
}

/// `HH:MM` for a provider timestamp; anything else is returned unchanged.
pub fn short_label(label: &str) -> String {
    NaiveDateTime::parse_from_str(label, TIMESTAMP_FORMAT)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|_| label.to_string())
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn render_current(presenter: &mut dyn Presenter, conditions: &CurrentConditions) {
    presenter.show_current(&current_panel(conditions));
}

pub fn render_forecast(presenter: &mut dyn Presenter, entries: &[ForecastEntry]) {
    presenter.clear_forecast();
    for entry in daily_forecast(entries) {
        presenter.push_forecast_card(&forecast_card(entry));
    }
}

pub fn render_day_ranges(presenter: &mut dyn Presenter, entries: &[ForecastEntry]) {
    presenter.show_day_ranges(&day_ranges(entries));
}

/// Draw the temperature chart, disposing the chart held in `slot` first.
pub fn render_chart(
    slot: &mut Option<ChartHandle>,
    presenter: &mut dyn Presenter,
    entries: &[ForecastEntry],
) {
    if let Some(previous) = slot.take() {
        presenter.dispose_chart(previous);
    }
    *slot = Some(presenter.draw_chart(&chart_series(entries)));
}
