use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use darkmode_core::preference::dark_mode_store::DarkModeStore;
use darkmode_core::storage::domain::key_value_store::KeyValueStore;
use darkmode_core::storage::infrastructure::json_file_store::JsonFileStore;

/// Show or toggle the persisted dark mode preference.
#[derive(Parser)]
#[command(name = "darkmode")]
struct Cli {
    /// Preference file (defaults to the platform config directory).
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Treat a malformed stored value as light mode instead of failing.
    #[arg(long, global = true)]
    lenient: bool,

    /// Print the raw JSON boolean instead of on/off.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print the current preference.
    Show,
    /// Flip the preference and persist it.
    Toggle,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let storage = open_storage(cli.store)?;
    log::debug!("Using preference file {}", storage.path().display());

    let mut store = load_store(storage, cli.lenient)?;
    let on = execute(&mut store, &cli.command)?;
    println!("{}", format_state(on, cli.json));
    Ok(())
}

fn open_storage(path: Option<PathBuf>) -> Result<JsonFileStore, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(JsonFileStore::open(path)),
        None => Ok(JsonFileStore::open_default()?),
    }
}

fn load_store<S: KeyValueStore>(
    storage: S,
    lenient: bool,
) -> Result<DarkModeStore<S>, Box<dyn std::error::Error>> {
    let store = if lenient {
        DarkModeStore::load_or_default(storage)?
    } else {
        DarkModeStore::load(storage)?
    };
    Ok(store)
}

/// Runs `command` against `store` and returns the resulting state.
fn execute<S: KeyValueStore>(
    store: &mut DarkModeStore<S>,
    command: &Command,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Command::Show => {}
        Command::Toggle => {
            store.toggle_dark_mode()?;
            log::info!(
                "Dark mode {}",
                if store.is_dark_mode_on() { "enabled" } else { "disabled" }
            );
        }
    }
    Ok(store.is_dark_mode_on())
}

fn format_state(on: bool, json: bool) -> String {
    match (json, on) {
        (true, on) => on.to_string(),
        (false, true) => "on".to_string(),
        (false, false) => "off".to_string(),
    }
}
