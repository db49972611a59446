//! End-to-end dashboard tests against a mock OpenWeather server.

use glassweather_core::{
    Dashboard, HistoryStore, KeyValueStore, MemoryStore, QueryOutcome, StoreError, Theme,
    history::HISTORY_KEY,
    provider::openweather::OpenWeatherProvider,
    render::{ChartHandle, ChartSeries, CurrentPanel, DayRange, ForecastCard, Presenter},
    theme::{Decoration, DecorationKind},
};
use serde_json::json;
use std::{io, path::PathBuf};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Presenter that keeps what a display surface would currently show.
#[derive(Debug, Default)]
struct RecordingPresenter {
    current: Option<CurrentPanel>,
    current_renders: usize,
    cards: Vec<ForecastCard>,
    ranges: Vec<DayRange>,
    decorations: Vec<Decoration>,
    theme: Option<Theme>,
    history: Vec<String>,
    history_renders: usize,
    charts: Vec<(ChartHandle, ChartSeries)>,
    disposed: Vec<ChartHandle>,
}

impl Presenter for RecordingPresenter {
    fn show_current(&mut self, panel: &CurrentPanel) {
        self.current = Some(panel.clone());
        self.current_renders += 1;
    }

    fn clear_forecast(&mut self) {
        self.cards.clear();
    }

    fn push_forecast_card(&mut self, card: &ForecastCard) {
        self.cards.push(card.clone());
    }

    fn show_day_ranges(&mut self, ranges: &[DayRange]) {
        self.ranges = ranges.to_vec();
    }

    fn draw_chart(&mut self, series: &ChartSeries) -> ChartHandle {
        let handle = ChartHandle(self.charts.len() as u64 + 1);
        self.charts.push((handle, series.clone()));
        handle
    }

    fn dispose_chart(&mut self, handle: ChartHandle) {
        self.disposed.push(handle);
    }

    fn clear_decorations(&mut self) {
        self.decorations.clear();
        self.theme = None;
    }

    fn show_backdrop(&mut self, theme: Theme, decorations: &[Decoration]) {
        self.theme = Some(theme);
        self.decorations.extend_from_slice(decorations);
    }

    fn show_history(&mut self, cities: &[String]) {
        self.history = cities.to_vec();
        self.history_renders += 1;
    }
}

fn london_current() -> serde_json::Value {
    json!({
        "name": "London",
        "weather": [{"main": "Rain", "description": "light rain"}],
        "main": {"temp": 15.2, "humidity": 80},
        "wind": {"speed": 4.1}
    })
}

/// 40 three-hour samples over five days.
fn five_day_forecast() -> serde_json::Value {
    let list: Vec<_> = (0..40_i32)
        .map(|i| {
            let day = 11 + i / 8;
            let hour = (i % 8) * 3;
            json!({
                "dt_txt": format!("2024-12-{day:02} {hour:02}:00:00"),
                "main": {"temp": 10.0 + f64::from(i) / 2.0},
                "weather": [{"main": "Rain", "description": "light rain"}]
            })
        })
        .collect();

    json!({ "cod": "200", "list": list })
}

async fn mount(server: &MockServer, endpoint: &str, city: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/{endpoint}")))
        .and(query_param("q", city))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Store whose reads succeed but whose writes always fail, like a
/// read-only data directory.
#[derive(Debug)]
struct ReadOnlyStore(MemoryStore);

impl KeyValueStore for ReadOnlyStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.load(key)
    }

    fn save(&mut self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Write {
            path: PathBuf::from("storage.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

fn dashboard(server: &MockServer, store: MemoryStore) -> Dashboard<RecordingPresenter> {
    dashboard_with_store(server, Box::new(store))
}

fn dashboard_with_store(
    server: &MockServer,
    store: Box<dyn KeyValueStore>,
) -> Dashboard<RecordingPresenter> {
    let provider = OpenWeatherProvider::new("KEY".into(), server.uri(), None).unwrap();
    Dashboard::new(
        Box::new(provider),
        HistoryStore::new(store),
        RecordingPresenter::default(),
    )
}

#[tokio::test]
async fn london_query_renders_everything() {
    let server = MockServer::start().await;
    mount(&server, "weather", "London", london_current()).await;
    mount(&server, "forecast", "London", five_day_forecast()).await;

    let mut dash = dashboard(&server, MemoryStore::new());
    dash.start();

    let outcome = dash.search("  London ").await;
    assert_eq!(outcome, QueryOutcome::Rendered);

    let view = dash.presenter();
    let panel = view.current.as_ref().expect("current panel rendered");
    assert_eq!(
        panel.lines(),
        [
            "London",
            "Rain - light rain",
            "Temperature: 15.2°C",
            "Humidity: 80%",
            "Wind: 4.1 m/s",
        ]
    );

    assert_eq!(view.cards.len(), 5);
    assert_eq!(view.cards[0].date, "2024-12-11");
    assert_eq!(view.cards[0].temperature, "12°C");
    assert_eq!(view.ranges.len(), 5);

    assert_eq!(view.theme, Some(Theme::Rain));
    assert_eq!(view.decorations.len(), 40);
    assert!(
        view.decorations
            .iter()
            .all(|d| d.kind == DecorationKind::Raindrop)
    );

    assert_eq!(view.history, vec!["London"]);
    assert_eq!(dash.history().load(), vec!["London"]);

    assert_eq!(view.charts.len(), 1);
    assert_eq!(view.charts[0].1.values.len(), 8);
    assert_eq!(dash.session().chart, Some(ChartHandle(1)));
    assert_eq!(dash.session().backdrop.theme(), Some(Theme::Rain));
}

#[tokio::test]
async fn repeated_query_rerenders_without_duplicating_history() {
    let server = MockServer::start().await;
    mount(&server, "weather", "London", london_current()).await;
    mount(&server, "forecast", "London", five_day_forecast()).await;

    let mut dash = dashboard(&server, MemoryStore::new());
    dash.search("London").await;
    let outcome = dash.search("London").await;

    assert_eq!(outcome, QueryOutcome::Rendered);

    let view = dash.presenter();
    assert_eq!(view.current_renders, 2);
    assert_eq!(view.cards.len(), 5);
    assert_eq!(view.decorations.len(), 40);
    assert_eq!(view.history, vec!["London"]);
    assert_eq!(view.charts.len(), 2);
    assert_eq!(view.disposed, vec![ChartHandle(1)]);
    assert_eq!(dash.session().chart, Some(ChartHandle(2)));
}

#[tokio::test]
async fn blank_input_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut dash = dashboard(&server, MemoryStore::new());

    assert_eq!(dash.search("").await, QueryOutcome::Ignored);
    assert_eq!(dash.search("   \t").await, QueryOutcome::Ignored);
    assert!(dash.presenter().current.is_none());
}

#[tokio::test]
async fn failed_query_leaves_display_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404).set_body_string("city not found"))
        .mount(&server)
        .await;
    mount(&server, "forecast", "Atlantis", five_day_forecast()).await;

    let mut dash = dashboard(&server, MemoryStore::new());
    let outcome = dash.search("Atlantis").await;

    assert_eq!(outcome, QueryOutcome::Failed);

    let view = dash.presenter();
    assert!(view.current.is_none());
    assert!(view.cards.is_empty());
    assert!(view.charts.is_empty());
    assert!(view.theme.is_none());
    assert!(dash.history().load().is_empty());
}

#[tokio::test]
async fn history_write_failure_fails_after_panels_are_drawn() {
    let server = MockServer::start().await;
    mount(&server, "weather", "London", london_current()).await;
    mount(&server, "forecast", "London", five_day_forecast()).await;

    let store = ReadOnlyStore(MemoryStore::new().with_value(HISTORY_KEY, r#"["Paris"]"#));
    let mut dash = dashboard_with_store(&server, Box::new(store));
    dash.start();

    let outcome = dash.search("London").await;
    assert_eq!(outcome, QueryOutcome::Failed);

    let view = dash.presenter();
    assert_eq!(view.current_renders, 1);
    assert_eq!(view.cards.len(), 5);
    assert_eq!(view.theme, Some(Theme::Rain));
    assert!(view.charts.is_empty());
    assert_eq!(dash.session().chart, None);

    // Only the render from `start`; the list was not redrawn.
    assert_eq!(view.history_renders, 1);
    assert_eq!(view.history, vec!["Paris"]);
    assert_eq!(dash.history().load(), vec!["Paris"]);
}

#[tokio::test]
async fn malformed_forecast_fails_the_query() {
    let server = MockServer::start().await;
    mount(&server, "weather", "London", london_current()).await;
    mount(&server, "forecast", "London", json!({"cod": "200"})).await;

    let mut dash = dashboard(&server, MemoryStore::new());

    assert_eq!(dash.search("London").await, QueryOutcome::Failed);
    assert!(dash.presenter().current.is_none());
}

#[tokio::test]
async fn start_shows_stored_history_without_querying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = MemoryStore::new().with_value(HISTORY_KEY, r#"["Paris","Oslo"]"#);
    let mut dash = dashboard(&server, store);
    dash.start();

    assert_eq!(dash.presenter().history, vec!["Paris", "Oslo"]);
    assert!(dash.presenter().current.is_none());
}

#[tokio::test]
async fn selecting_history_entry_runs_full_query() {
    let server = MockServer::start().await;
    mount(
        &server,
        "weather",
        "Oslo",
        json!({
            "name": "Oslo",
            "weather": [{"main": "Snow", "description": "light snow"}],
            "main": {"temp": -3.5, "humidity": 90},
            "wind": {"speed": 2}
        }),
    )
    .await;
    mount(&server, "forecast", "Oslo", json!({"list": []})).await;

    let store = MemoryStore::new().with_value(HISTORY_KEY, r#"["Paris","Oslo"]"#);
    let mut dash = dashboard(&server, store);
    dash.start();

    let outcome = dash.select_history("Oslo").await;
    assert_eq!(outcome, QueryOutcome::Rendered);

    let view = dash.presenter();
    assert_eq!(
        view.current.as_ref().map(|p| p.temperature.as_str()),
        Some("Temperature: -3.5°C")
    );
    assert_eq!(view.theme, Some(Theme::Snow));
    assert_eq!(view.decorations.len(), 30);
    assert!(view.cards.is_empty());
    assert!(view.charts[0].1.values.is_empty());
    assert_eq!(view.history, vec!["Paris", "Oslo"]);
}
