//! Orchestrates one dashboard session: fetch, render, theme, history.

use anyhow::Result;
use tracing::{error, info};

use crate::{
    history::HistoryStore,
    provider::{self, WeatherProvider},
    render::{self, ChartHandle, Presenter},
    theme::{self, Backdrop},
};

/// Result of a user-triggered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Blank input; nothing was requested.
    Ignored,
    Rendered,
    /// The query failed and was logged; the display was left as it was.
    Failed,
}

/// Display state that outlives a single query.
#[derive(Debug, Default)]
pub struct Session {
    pub backdrop: Backdrop,
    pub chart: Option<ChartHandle>,
}

#[derive(Debug)]
pub struct Dashboard<V> {
    provider: Box<dyn WeatherProvider>,
    history: HistoryStore,
    presenter: V,
    session: Session,
}

impl<V: Presenter> Dashboard<V> {
    pub fn new(provider: Box<dyn WeatherProvider>, history: HistoryStore, presenter: V) -> Self {
        Self {
            provider,
            history,
            presenter,
            session: Session::default(),
        }
    }

    /// Show the stored history. No weather is requested.
    pub fn start(&mut self) {
        self.show_history();
    }

    /// Query weather for user input; blank input is ignored.
    pub async fn search(&mut self, input: &str) -> QueryOutcome {
        let city = input.trim();
        if city.is_empty() {
            return QueryOutcome::Ignored;
        }
        self.run_query(city).await
    }

    /// Re-run the query for a history entry.
    pub async fn select_history(&mut self, city: &str) -> QueryOutcome {
        self.run_query(city).await
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn provider(&self) -> &dyn WeatherProvider {
        self.provider.as_ref()
    }

    pub fn presenter(&self) -> &V {
        &self.presenter
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    async fn run_query(&mut self, city: &str) -> QueryOutcome {
        match self.query(city).await {
            Ok(()) => {
                info!(city, "weather rendered");
                QueryOutcome::Rendered
            }
            Err(err) => {
                error!(city, error = %format!("{err:#}"), "error fetching weather");
                QueryOutcome::Failed
            }
        }
    }

    async fn query(&mut self, city: &str) -> Result<()> {
        let (current, forecast) = provider::fetch_both(self.provider.as_ref(), city).await?;

        render::render_current(&mut self.presenter, &current);
        render::render_forecast(&mut self.presenter, &forecast);
        render::render_day_ranges(&mut self.presenter, &forecast);

        theme::apply_theme(
            &mut self.session.backdrop,
            &mut self.presenter,
            theme::classify(&current.condition),
            &mut rand::rng(),
        );

        self.history.add(city)?;
        self.show_history();

        render::render_chart(&mut self.session.chart, &mut self.presenter, &forecast);
        Ok(())
    }

    fn show_history(&mut self) {
        let cities = self.history.load();
        self.presenter.show_history(&cities);
    }
}
