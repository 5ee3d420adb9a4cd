mod cli;
mod commands;
mod error;
mod output;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use storefront_config::{Config, config_path, load_config_from};

use crate::cli::{Cli, ColorMode, Command, GlobalOpts, OutputFormat};
use crate::commands::Workspace;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Keep the raw matches around to tell explicit flags from defaults
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli, &matches).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(mut cli: Cli, matches: &ArgMatches) -> Result<(), CliError> {
    match cli.command {
        // Config commands work without a store
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "storefront", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let path = cli.global.config.clone().unwrap_or_else(config_path);
            let cfg = load_config_from(&path)?;
            apply_config_defaults(&mut cli.global, &cfg, matches);

            let mut workspace = Workspace::open(&cli.global, &cfg, &path)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &mut workspace, &cli.global).await
        }
    }
}

/// Output and color fall back to `[defaults]` unless given on the
/// command line or through the environment.
fn apply_config_defaults(global: &mut GlobalOpts, cfg: &Config, matches: &ArgMatches) {
    let defaulted = |id: &str| matches.value_source(id) == Some(ValueSource::DefaultValue);

    if defaulted("output") {
        match <OutputFormat as ValueEnum>::from_str(&cfg.defaults.output, true) {
            Ok(format) => global.output = format,
            Err(_) => warn!(value = %cfg.defaults.output, "ignoring unknown defaults.output"),
        }
    }
    if defaulted("color") {
        match <ColorMode as ValueEnum>::from_str(&cfg.defaults.color, true) {
            Ok(mode) => global.color = mode,
            Err(_) => warn!(value = %cfg.defaults.color, "ignoring unknown defaults.color"),
        }
    }
}
