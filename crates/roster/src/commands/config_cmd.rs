//! Config subcommand handlers.

use roster_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::{config, output};

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_file(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::with_overrides(config::load(global)?, global);
            let rendered = match global.output {
                Some(OutputFormat::Json) => serde_json::to_string_pretty(&cfg)?,
                Some(OutputFormat::JsonCompact) => serde_json::to_string(&cfg)?,
                Some(OutputFormat::Yaml) => serde_yaml::to_string(&cfg)?,
                _ => toml::to_string_pretty(&cfg)?,
            };
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_file(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            // The file being replaced may be unreadable; color then falls back to flags.
            let current = config::load(global).unwrap_or_default();
            roster_config::save_config_to(&Config::default(), &path)?;
            if !global.quiet {
                let color = output::should_color(config::color_mode(global, &current));
                eprintln!(
                    "{}",
                    output::success_line(&format!("Wrote {}", path.display()), color)
                );
            }
            Ok(())
        }
    }
}
