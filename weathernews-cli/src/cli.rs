use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use weathernews_core::{
    Aggregator, Config, Coordinator, DirSource, Lang, Snapshot, WeatherError,
};

use crate::translations;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weathernews", version, about = "One-sentence weather briefing")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure language and payload directory.
    Configure,

    /// Run one refresh cycle and print the briefing.
    Brief {
        /// Directory holding main.json, commentary.json and air.json.
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Print the whole snapshot as JSON instead of the sentence.
        #[arg(long)]
        json: bool,
    },

    /// Refresh periodically, printing each new briefing.
    Watch {
        /// Directory holding the payload files.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Brief { dir, json } => brief(dir, json).await,
            Command::Watch { dir } => watch(dir).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let lang = Select::new("Language:", Lang::all().to_vec())
        .prompt()
        .context("Failed to read language")?;

    let mut dir = Text::new("Payload directory:");
    let current_dir = config.payload_dir.as_ref().map(|p| p.display().to_string());
    if let Some(current) = current_dir.as_deref() {
        dir = dir.with_default(current);
    }
    let dir = dir.prompt().context("Failed to read payload directory")?;

    config.set_lang(lang);
    config.payload_dir = Some(PathBuf::from(dir.trim()));
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn coordinator(config: &Config, dir: Option<PathBuf>) -> Result<Coordinator<DirSource>> {
    let dir = match dir {
        Some(dir) => dir,
        None => config.payload_dir()?.to_path_buf(),
    };
    let lang = config.lang()?;
    let tr = translations::load(config.translations_dir.as_deref(), lang)?;

    tracing::debug!(dir = %dir.display(), lang = %lang, "Starting coordinator");
    Ok(Coordinator::new(DirSource::new(dir), Aggregator::new(tr)))
}

async fn brief(dir: Option<PathBuf>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let coordinator = coordinator(&config, dir)?;

    let snapshot = coordinator.refresh().await.context("Weather update failed")?;
    print_snapshot(&snapshot, json)
}

async fn watch(dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let coordinator = coordinator(&config, dir)?;
    let mut ticker = tokio::time::interval(config.update_interval());

    tracing::info!(
        interval_secs = config.update_interval().as_secs(),
        "Watching weather payloads"
    );

    loop {
        ticker.tick().await;
        match coordinator.refresh().await {
            Ok(snapshot) => {
                let at = snapshot.updated_at.with_timezone(&Local).format("%H:%M");
                println!("[{at}] {}", snapshot.current.briefing.sentence);
            }
            Err(WeatherError::RefreshInProgress) => {
                tracing::warn!("Previous refresh still running; skipping tick");
            }
            // Already logged by the coordinator; the previous snapshot stays.
            Err(_) => {}
        }
    }
}

fn print_snapshot(snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
        println!("{out}");
    } else {
        println!("{}", snapshot.current.briefing.sentence);
    }
    Ok(())
}
