//! `roster-tui`: Interactive terminal view over a remote user directory.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `roster-core`'s [`UserStream`](roster_core::UserStream). Users are
//! fetched once on start, then searched, sorted, deleted (locally) and
//! added (via POST) from a single screen.
//!
//! Logs are written to a file (default `/tmp/roster-tui.log`) to avoid
//! corrupting the terminal UI. Load and add failures only ever show up
//! there.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use roster_config::{Config, ConfigError};
use roster_core::{Directory, ViewQuery};

use crate::app::App;

/// Terminal view for searching, sorting and extending a remote user list.
#[derive(Parser, Debug)]
#[command(name = "roster-tui", version, about)]
struct Cli {
    /// URL the user list is fetched from
    #[arg(long, env = "ROSTER_LIST_URL")]
    list_url: Option<String>,

    /// URL new users are POSTed to
    #[arg(long, env = "ROSTER_CREATE_URL")]
    create_url: Option<String>,

    /// Log file path (defaults to /tmp/roster-tui.log)
    #[arg(long, default_value = "/tmp/roster-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr because that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(log_level)));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("roster-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true),
        )
        .init();

    guard
}

/// Per-crate directive covering the binary and every library it logs through.
fn default_directive(level: &str) -> String {
    ["roster_tui", "roster_core", "roster_api"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// The loaded config, or defaults when the file could not be read or parsed.
fn config_or_default(loaded: Result<Config, ConfigError>) -> Config {
    loaded.unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config, using defaults");
        Config::default()
    })
}

/// Build the directory and initial view from the config file, with CLI
/// flags taking priority over it.
fn build_directory(cli: &Cli) -> Result<(Directory, ViewQuery)> {
    let mut cfg = config_or_default(roster_config::load_config());
    if let Some(ref url) = cli.list_url {
        cfg.endpoint.list_url.clone_from(url);
    }
    if let Some(ref url) = cli.create_url {
        cfg.endpoint.create_url.clone_from(url);
    }

    let query = ViewQuery::new("", cfg.defaults.sort_field, cfg.defaults.sort_order);
    let directory = Directory::new(roster_config::to_directory_config(&cfg)?)?;
    Ok((directory, query))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file; hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    let (directory, query) = build_directory(&cli)?;

    info!(
        list_url = %directory.config().list_url,
        create_url = %directory.config().create_url,
        "starting roster-tui"
    );

    let mut app = App::new(directory, query);
    app.run().await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use roster_core::{SortField, SortOrder};

    #[test]
    fn default_directive_enables_request_logging() {
        let directive = default_directive("debug");
        assert_eq!(directive, "roster_tui=debug,roster_core=debug,roster_api=debug");

        let subscriber = tracing_subscriber::registry().with(EnvFilter::new(directive));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "roster_api::client", tracing::Level::DEBUG));
            assert!(!tracing::enabled!(target: "roster_api::client", tracing::Level::TRACE));
        });
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nsort_field = \"nonsense\"\n").unwrap();

        let cfg = config_or_default(roster_config::load_config_from(&path));
        assert_eq!(cfg.defaults.sort_field, SortField::Name);
        assert_eq!(cfg.defaults.sort_order, SortOrder::Ascending);
    }

    #[test]
    fn readable_config_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nsort_field = \"email\"\nsort_order = \"desc\"\n")
            .unwrap();

        let cfg = config_or_default(roster_config::load_config_from(&path));
        assert_eq!(cfg.defaults.sort_field, SortField::Email);
        assert_eq!(cfg.defaults.sort_order, SortOrder::Descending);
    }
}
