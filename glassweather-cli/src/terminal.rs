//! Terminal rendition of the dashboard.

use glassweather_core::{
    Theme,
    render::{
        ChartHandle, ChartSeries, CurrentPanel, DayRange, ForecastCard, Presenter, short_label,
    },
    theme::{Decoration, DecorationKind},
};
use tracing::debug;

/// Columns of the backdrop strip.
const BACKDROP_WIDTH: usize = 48;
/// Rows used by themes that place decorations vertically (night sky).
const SKY_ROWS: usize = 4;
/// Stars are placed within the top 40% of the viewport.
const SKY_DEPTH_PCT: f64 = 40.0;

const CHART_HEIGHT: usize = 6;
const CHART_COLUMN: usize = 7;

#[derive(Debug, Default)]
pub struct TerminalPresenter {
    next_chart: u64,
    active_chart: Option<ChartHandle>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for TerminalPresenter {
    fn show_current(&mut self, panel: &CurrentPanel) {
        print!("{}", format_panel(panel));
    }

    fn clear_forecast(&mut self) {
        println!("\nForecast");
    }

    fn push_forecast_card(&mut self, card: &ForecastCard) {
        println!(
            "  {:<10}  {:<12}  {}",
            card.date, card.condition, card.temperature
        );
    }

    fn show_day_ranges(&mut self, ranges: &[DayRange]) {
        if ranges.is_empty() {
            return;
        }
        println!("\nDaily range");
        for range in ranges {
            println!("  {}  {}°C .. {}°C", range.date, range.min_c, range.max_c);
        }
    }

    fn draw_chart(&mut self, series: &ChartSeries) -> ChartHandle {
        self.next_chart += 1;
        let handle = ChartHandle(self.next_chart);
        print!("\n{}", format_chart(series));
        self.active_chart = Some(handle);
        handle
    }

    fn dispose_chart(&mut self, handle: ChartHandle) {
        if self.active_chart == Some(handle) {
            self.active_chart = None;
        }
        debug!(chart = handle.0, "chart disposed");
    }

    fn clear_decorations(&mut self) {
        // Nothing to erase: earlier output has scrolled into history.
        debug!("backdrop cleared");
    }

    fn show_backdrop(&mut self, theme: Theme, decorations: &[Decoration]) {
        print!("\n{}", format_backdrop(theme, decorations));
    }

    fn show_history(&mut self, cities: &[String]) {
        if !cities.is_empty() {
            println!("\nHistory: {}", cities.join(" | "));
        }
    }
}

fn format_panel(panel: &CurrentPanel) -> String {
    let [city, rest @ ..] = panel.lines();
    let mut out = format!("\n== {city} ==\n");
    for line in rest {
        out.push_str(&format!("  {line}\n"));
    }
    out
}

fn glyph(kind: DecorationKind) -> char {
    match kind {
        DecorationKind::Raindrop => '|',
        DecorationKind::Snowflake => '*',
        DecorationKind::Star => '+',
        DecorationKind::CloudLayer => '~',
        DecorationKind::SunGlow => 'O',
    }
}

fn format_backdrop(theme: Theme, decorations: &[Decoration]) -> String {
    let rows = if theme == Theme::Night { SKY_ROWS } else { 1 };
    let mut grid = vec![vec![' '; BACKDROP_WIDTH]; rows];

    for decoration in decorations {
        match decoration.kind {
            DecorationKind::CloudLayer => {
                for (col, cell) in grid[0].iter_mut().enumerate() {
                    if col % 6 < 4 {
                        *cell = '~';
                    }
                }
            }
            DecorationKind::SunGlow => {
                let sun = "-- ( O ) --";
                let start = (BACKDROP_WIDTH - sun.len()) / 2;
                for (offset, ch) in sun.chars().enumerate() {
                    grid[0][start + offset] = ch;
                }
            }
            kind => {
                let left = decoration.left_pct.unwrap_or(0.0);
                let col = ((left / 100.0) * BACKDROP_WIDTH as f64) as usize;
                let row = decoration
                    .top_pct
                    .map_or(0, |top| ((top / SKY_DEPTH_PCT) * rows as f64) as usize);
                grid[row.min(rows - 1)][col.min(BACKDROP_WIDTH - 1)] = glyph(kind);
            }
        }
    }

    let mut out = format!("[{theme}]\n");
    for row in grid {
        out.push_str(row.iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

fn format_chart(series: &ChartSeries) -> String {
    let mut out = format!("{}\n", series.label);
    if series.values.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let min = series.values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let last_row = CHART_HEIGHT - 1;

    let row_of = |value: f64| {
        if span == 0.0 {
            last_row / 2
        } else {
            (((max - value) / span) * last_row as f64).round() as usize
        }
    };

    for row in 0..CHART_HEIGHT {
        let level = max - span * row as f64 / last_row as f64;
        let mut line = format!("{level:>6.1} |");
        for &value in &series.values {
            let mark = if row_of(value) == row { "*" } else { " " };
            line.push_str(&format!("{mark:^width$}", width = CHART_COLUMN));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!(
        "{:>7}+{}\n",
        "",
        "-".repeat(CHART_COLUMN * series.values.len())
    ));

    let mut labels = " ".repeat(8);
    for label in &series.labels {
        labels.push_str(&format!("{:^width$}", short_label(label), width = CHART_COLUMN));
    }
    out.push_str(labels.trim_end());
    out.push('\n');
    out
}
