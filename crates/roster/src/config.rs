//! CLI-side configuration: flag overrides layered on top of
//! `roster_config`, producing the `DirectoryConfig` core expects.
//!
//! Precedence: flags > env > file > defaults.

use std::path::PathBuf;

use clap::ValueEnum;

use roster_config::Config;
use roster_core::DirectoryConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// The config file this invocation reads (and `config init` writes).
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(roster_config::config_path)
}

/// Load file + environment.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(roster_config::load_config_from(&config_file(global))?)
}

/// Apply endpoint flags to a loaded config.
pub fn with_overrides(mut cfg: Config, global: &GlobalOpts) -> Config {
    if let Some(ref url) = global.list_url {
        cfg.endpoint.list_url.clone_from(url);
    }
    if let Some(ref url) = global.create_url {
        cfg.endpoint.create_url.clone_from(url);
    }
    if let Some(secs) = global.timeout {
        cfg.endpoint.timeout = Some(secs);
    }
    cfg
}

/// Build the `DirectoryConfig` for this invocation.
pub fn directory_config(global: &GlobalOpts, cfg: &Config) -> Result<DirectoryConfig, CliError> {
    let effective = with_overrides(cfg.clone(), global);
    Ok(roster_config::to_directory_config(&effective)?)
}

/// Output format: flag, else config default, else table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&cfg.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

/// Color mode: flag, else config default, else auto.
pub fn color_mode(global: &GlobalOpts, cfg: &Config) -> ColorMode {
    global.color.unwrap_or_else(|| {
        ColorMode::from_str(&cfg.defaults.color, true).unwrap_or(ColorMode::Auto)
    })
}
