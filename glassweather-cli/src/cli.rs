use std::fmt;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glassweather_core::{
    Config, Dashboard, FileStore, HistoryStore,
    provider::{self, locate},
    render,
};
use inquire::{InquireError, Password, Select, Text};
use tracing::warn;

use crate::terminal::TerminalPresenter;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "glassweather", version, about = "Weather dashboard in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather, forecast and chart for a city.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Show weather for the city your IP address resolves to.
    Here,

    /// List previously searched cities.
    History {
        /// Pick an entry and show its weather.
        #[arg(long)]
        pick: bool,
    },

    /// Manage favorite cities.
    #[command(subcommand)]
    Fav(FavCommand),

    /// Interactive dashboard (the default).
    Dashboard,
}

#[derive(Debug, Subcommand)]
pub enum FavCommand {
    Add { city: String },
    Remove { city: String },
    /// Show current conditions for every favorite.
    List,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Dashboard);

        // `configure` must still work when the existing file is broken.
        let config = match command {
            Command::Configure => Config::load_or_default()?,
            _ => Config::load()?,
        };

        match command {
            Command::Configure => configure(config),
            Command::Show { city } => {
                let mut dash = open_dashboard(&config)?;
                dash.start();
                dash.search(&city).await;
                Ok(())
            }
            Command::Here => {
                let city = locate::locate().await;
                println!("Detected location: {city}");
                let mut dash = open_dashboard(&config)?;
                dash.start();
                dash.search(&city).await;
                Ok(())
            }
            Command::History { pick } => history(&config, pick).await,
            Command::Fav(cmd) => favorites(&config, cmd).await,
            Command::Dashboard => interactive(&config).await,
        }
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn open_dashboard(config: &Config) -> anyhow::Result<Dashboard<TerminalPresenter>> {
    let provider = provider::provider_from_config(config)?;
    Ok(Dashboard::new(
        provider,
        open_history(config)?,
        TerminalPresenter::new(),
    ))
}

fn open_history(config: &Config) -> anyhow::Result<HistoryStore> {
    let path = config.storage_file()?;
    let store = FileStore::open(&path)
        .with_context(|| format!("Failed to open storage at {}", path.display()))?;
    Ok(HistoryStore::new(Box::new(store)))
}

async fn history(config: &Config, pick: bool) -> anyhow::Result<()> {
    if !pick {
        let cities = open_history(config)?.load();
        if cities.is_empty() {
            println!("No searches yet.");
        }
        for city in cities {
            println!("{city}");
        }
        return Ok(());
    }

    let mut dash = open_dashboard(config)?;
    let cities = dash.history().load();
    if cities.is_empty() {
        println!("No searches yet.");
        return Ok(());
    }

    match Select::new("Show weather for:", cities).prompt() {
        Ok(city) => {
            dash.select_history(&city).await;
            Ok(())
        }
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

async fn favorites(config: &Config, cmd: FavCommand) -> anyhow::Result<()> {
    match cmd {
        FavCommand::Add { city } => {
            let city = city.trim();
            if open_history(config)?.add_favorite(city)? {
                println!("Added {city} to favorites.");
            } else {
                println!("{city} is already a favorite.");
            }
        }
        FavCommand::Remove { city } => {
            let city = city.trim();
            if open_history(config)?.remove_favorite(city)? {
                println!("Removed {city} from favorites.");
            } else {
                println!("{city} is not a favorite.");
            }
        }
        FavCommand::List => {
            let dash = open_dashboard(config)?;
            let favorites = dash.history().favorites();
            if favorites.is_empty() {
                println!("No favorites yet. Add one with `glassweather fav add <CITY>`.");
            }

            for city in favorites {
                match dash.provider().fetch_current(&city).await {
                    Ok(current) => println!("{}\n", render::favorite_summary(&current).join("\n")),
                    Err(err) => warn!(%city, error = %err, "skipping favorite"),
                }
            }
        }
    }
    Ok(())
}

enum MenuItem {
    Search,
    City(String),
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Search => f.write_str("Search a city"),
            MenuItem::City(city) => write!(f, "  {city}"),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

async fn interactive(config: &Config) -> anyhow::Result<()> {
    let mut dash = open_dashboard(config)?;
    dash.start();

    loop {
        let mut items = vec![MenuItem::Search];
        items.extend(dash.history().load().into_iter().map(MenuItem::City));
        items.push(MenuItem::Quit);

        let choice = match Select::new("What next?", items).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        // Failed queries are logged by the dashboard and leave the display as is.
        match choice {
            MenuItem::Search => match Text::new("City:").prompt() {
                Ok(input) => {
                    dash.search(&input).await;
                }
                Err(InquireError::OperationCanceled) => continue,
                Err(InquireError::OperationInterrupted) => break,
                Err(err) => return Err(err.into()),
            },
            MenuItem::City(city) => {
                dash.select_history(&city).await;
            }
            MenuItem::Quit => break,
        }
    }

    Ok(())
}
