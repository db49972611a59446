//! Weather-themed decorative backdrop.

use std::{fmt, ops::Range};

use rand::Rng;

use crate::render::Presenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Rain,
    Snow,
    Cloud,
    Clear,
    Night,
}

/// Matching order for [`classify`]: the first keyword found wins.
const PRECEDENCE: [(&str, Theme); 4] = [
    ("rain", Theme::Rain),
    ("snow", Theme::Snow),
    ("cloud", Theme::Cloud),
    ("clear", Theme::Clear),
];

/// Theme for a primary condition label, e.g. "Rain" or "Clouds".
///
/// Case-insensitive substring match in [`PRECEDENCE`] order; anything
/// unmatched is [`Theme::Night`].
pub fn classify(condition: &str) -> Theme {
    let condition = condition.to_lowercase();

    PRECEDENCE
        .iter()
        .find(|(keyword, _)| condition.contains(keyword))
        .map_or(Theme::Night, |&(_, theme)| theme)
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Rain => "rain",
            Theme::Snow => "snow",
            Theme::Cloud => "cloud",
            Theme::Clear => "clear",
            Theme::Night => "night",
        }
    }

    pub fn decoration_kind(&self) -> DecorationKind {
        match self {
            Theme::Rain => DecorationKind::Raindrop,
            Theme::Snow => DecorationKind::Snowflake,
            Theme::Cloud => DecorationKind::CloudLayer,
            Theme::Clear => DecorationKind::SunGlow,
            Theme::Night => DecorationKind::Star,
        }
    }

    fn spawn_plan(&self) -> SpawnPlan {
        match self {
            Theme::Rain => SpawnPlan::Scattered {
                count: 40,
                duration: 0.5..1.5,
                top: None,
            },
            Theme::Snow => SpawnPlan::Scattered {
                count: 30,
                duration: 2.0..5.0,
                top: None,
            },
            Theme::Cloud | Theme::Clear => SpawnPlan::Single,
            Theme::Night => SpawnPlan::Scattered {
                count: 20,
                duration: 1.0..3.0,
                top: Some(0.0..40.0),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum SpawnPlan {
    Single,
    Scattered {
        count: usize,
        duration: Range<f64>,
        top: Option<Range<f64>>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    Raindrop,
    Snowflake,
    CloudLayer,
    SunGlow,
    Star,
}

/// One decorative element. Positions are percentages of the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub left_pct: Option<f64>,
    pub top_pct: Option<f64>,
    pub duration_secs: Option<f64>,
}

/// Fresh decorations for `theme`.
pub fn spawn_decorations<R: Rng>(theme: Theme, rng: &mut R) -> Vec<Decoration> {
    let kind = theme.decoration_kind();

    match theme.spawn_plan() {
        SpawnPlan::Single => vec![Decoration {
            kind,
            left_pct: None,
            top_pct: None,
            duration_secs: None,
        }],
        SpawnPlan::Scattered {
            count,
            duration,
            top,
        } => (0..count)
            .map(|_| Decoration {
                kind,
                left_pct: Some(rng.random_range(0.0..100.0)),
                top_pct: top.clone().map(|range| rng.random_range(range)),
                duration_secs: Some(rng.random_range(duration.clone())),
            })
            .collect(),
    }
}

/// The active theme and the decorations spawned for it.
#[derive(Debug, Default)]
pub struct Backdrop {
    theme: Option<Theme>,
    decorations: Vec<Decoration>,
}

impl Backdrop {
    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }
}

/// Switch the backdrop to `theme`.
///
/// Every decoration is removed first, whatever theme spawned it.
pub fn apply_theme<R: Rng>(
    backdrop: &mut Backdrop,
    presenter: &mut dyn Presenter,
    theme: Theme,
    rng: &mut R,
) {
    backdrop.decorations.clear();
    presenter.clear_decorations();

    backdrop.decorations = spawn_decorations(theme, rng);
    backdrop.theme = Some(theme);
    presenter.show_backdrop(theme, &backdrop.decorations);
}
