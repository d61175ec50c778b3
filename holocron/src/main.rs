//! holocron - command-line front end
//!
//! Fetches the configured characters, merges them with locally saved edits,
//! and lets individual cards be edited and saved.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use holocron::render::{render_card, render_people, render_person};
use holocron::store::FileStorage;
use holocron::AppState;
use holocron_common::config::{
    resolve_config_path, write_toml_config, RootFolderInitializer, RootFolderResolver,
    TomlConfig,
};
use holocron_common::events::{EventBus, HolocronEvent};
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for holocron
#[derive(Parser, Debug)]
#[command(name = "holocron")]
#[command(about = "Fetch, cache and edit Star Wars character cards")]
#[command(version)]
struct Args {
    /// Folder holding the persisted storage file
    #[arg(short, long, env = "HOLOCRON_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch characters by name, merge with saved cards, and save the result
    Fetch {
        /// Names to fetch (defaults to the configured names)
        names: Vec<String>,
    },
    /// Show the saved cards
    List,
    /// Look up a saved card by name, ignoring case
    Find { name: String },
    /// Edit one saved card and save it
    Edit {
        /// Card index as shown by `list`
        index: usize,
        /// Field assignment, e.g. --set name="Master Yoda"
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        assignments: Vec<(String, String)>,
    },
    /// Write the effective configuration to the config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn parse_assignment(raw: &str) -> std::result::Result<(String, String), String> {
    let (property, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected property=value, got '{}'", raw))?;
    Ok((property.trim().to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref())?;
    let config = TomlConfig::load(&config_path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match args.command {
        Command::InitConfig { force } => return init_config(&config, &config_path, force),
        command => command,
    };

    let root_folder = RootFolderResolver::new(args.root_folder.clone(), &config).resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let storage_path = initializer.storage_path();
    info!("Root folder: {}", initializer.root_folder().display());
    info!("Storage: {}", storage_path.display());
    let storage = Arc::new(FileStorage::open(&storage_path).context("Failed to open storage")?);

    let event_bus = EventBus::new(64);
    let mut events = event_bus.subscribe();
    let state = AppState::from_config(&config, storage, event_bus)?;

    match command {
        Command::Fetch { names } => {
            let names = if names.is_empty() {
                config.names_or_default()
            } else {
                names
            };
            let people = state.aggregator().fetch_many(&names).await;
            print!("{}", render_people(&people));
        }
        Command::List => {
            let people = state.store.list()?;
            print!("{}", render_people(&people));
        }
        Command::Find { name } => match state.store.locate_by_name(&name)? {
            Some((index, person)) => print!("{}", render_person(index, &person)),
            None => println!("No saved card for '{}'", name),
        },
        Command::Edit { index, assignments } => {
            let mut roster = state.roster()?;
            roster.begin_edit(index)?;
            for (property, value) in assignments {
                roster.set_field(index, &property, value)?;
            }
            roster.save(index)?;
            print!("{}", render_card(index, roster.card(index)?));
        }
        Command::InitConfig { .. } => {}
    }

    drain_cues(&mut events);
    Ok(())
}

fn init_config(config: &TomlConfig, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    write_toml_config(config, path).context("Failed to write config")?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Print every cue triggered during this run
fn drain_cues(events: &mut broadcast::Receiver<HolocronEvent>) {
    while let Ok(event) = events.try_recv() {
        if let HolocronEvent::CueTriggered { cue, asset, .. } = event {
            println!("♪ {} ({})", cue, asset);
        }
    }
}
