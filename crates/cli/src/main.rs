use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use localmarket_engine::{MarketState, seed_store};
use localmarket_tui::TuiOptions;
use localmarket_types::Category;
use localmarket_util::{UserPreferences, default_data_file, expand_tilde};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod search;

use search::SearchArgs;

/// Environment variable overriding the TUI log file location.
const LOG_PATH_ENV: &str = "LOCALMARKET_LOG_PATH";
const DEFAULT_LOG_FILE: &str = "tui.log";

/// Browse tours, tickets, rentals and transfers from the terminal.
#[derive(Parser, Debug)]
#[command(name = "localmarket", version, about)]
struct Cli {
    /// Category to open (tours, tickets, rent, transfer)
    #[arg(long, global = true)]
    category: Option<Category>,

    /// Theme id or alias (market, dracula, ansi256)
    #[arg(long)]
    theme: Option<String>,

    /// Write TUI logs to this file instead of the default location
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the listings matching the given filters and exit
    Search(SearchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Search(args)) => {
            init_stderr_tracing();
            run_search(cli.category, &args)
        }
        None => {
            let log_path = resolve_log_path(cli.log_file.as_deref());
            init_file_tracing(&log_path)?;
            let options = TuiOptions {
                category: cli.category,
                theme: cli.theme,
                preferences: Arc::new(load_preferences()),
            };
            localmarket_tui::run(seed_store(), options).await
        }
    }
}

fn run_search(category: Option<Category>, args: &SearchArgs) -> Result<()> {
    let category = category.unwrap_or_default();
    let filters = args.to_filters(category)?;
    let state = MarketState::with_filters(seed_store(), category, filters);
    let listings: Vec<_> = state.visible().collect();
    let output = if args.json {
        serde_json::to_string_pretty(&listings).context("failed to serialize listings")?
    } else {
        search::render_text(&listings)
    };
    println!("{output}");
    Ok(())
}

fn load_preferences() -> UserPreferences {
    UserPreferences::new().unwrap_or_else(|error| {
        warn!(%error, "failed to load preferences; using in-memory defaults");
        UserPreferences::ephemeral()
    })
}

fn resolve_log_path(flag: Option<&Path>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    match std::env::var(LOG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => expand_tilde(&path),
        _ => default_data_file(DEFAULT_LOG_FILE),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// The TUI owns the terminal, so logs go to a file.
fn init_file_tracing(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tui_flags() {
        let cli = Cli::try_parse_from(["localmarket", "--category", "rent", "--theme", "dracula"]).expect("parse");
        assert_eq!(cli.category, Some(Category::Rent));
        assert_eq!(cli.theme.as_deref(), Some("dracula"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_search_subcommand() {
        let cli = Cli::try_parse_from([
            "localmarket",
            "search",
            "--price",
            "130",
            "--feature",
            "Historical Sites",
            "--json",
        ])
        .expect("parse");
        let Some(Command::Search(args)) = cli.command else {
            panic!("expected search subcommand");
        };
        assert_eq!(args.price, Some(130.0));
        assert_eq!(args.features, vec!["Historical Sites".to_string()]);
        assert!(args.json);
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(Cli::try_parse_from(["localmarket", "--category", "cruise"]).is_err());
    }

    #[test]
    fn log_flag_wins_over_default() {
        let path = resolve_log_path(Some(Path::new("/tmp/market.log")));
        assert_eq!(path, PathBuf::from("/tmp/market.log"));
    }
}
