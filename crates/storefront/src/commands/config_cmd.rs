//! Config command handlers. These never touch a store snapshot.

use std::path::PathBuf;

use storefront_config::{Config, config_path, load_config_from, save_config, save_config_to};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

fn target_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = target_path(global);

    match args.command {
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::Conflict {
                    resource_type: "config file".into(),
                    identifier: path.display().to_string(),
                });
            }
            let cfg = Config {
                store: global.store.clone(),
                ..Config::default()
            };
            let written = match global.config {
                Some(ref explicit) => {
                    save_config_to(&cfg, explicit)?;
                    explicit.clone()
                }
                None => save_config(&cfg)?,
            };
            output::success(
                &format!("Config written to {}", written.display()),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = load_config_from(&path)?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_default(),
                |_| path.display().to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
