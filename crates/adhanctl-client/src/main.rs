//! adhanctl CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing::{Level, debug};

use adhanctl_client::cli::{Cli, Command, ConfigAction};
use adhanctl_client::commands;
use adhanctl_client::config::Config;
use adhanctl_client::error::ClientResult;
use adhanctl_client::wizard::StdioInteractor;
use adhanctl_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.resolved_command();

    let tracing = match (&command, cli.verbose) {
        (Command::Serve, false) => TracingConfig::daemon(),
        (Command::Serve, true) => TracingConfig::daemon().with_level(Level::DEBUG),
        (_, true) => TracingConfig::cli_debug(),
        (_, false) => TracingConfig::cli(),
    };
    if let Err(e) = init_tracing(tracing) {
        eprintln!("warning: {}", e);
    }

    match run(&cli, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, command: Command) -> ClientResult<()> {
    let path = cli.config.clone().unwrap_or_else(Config::default_path);
    debug!(path = %path.display(), "Using config file");

    // Config commands handle a missing or broken file themselves.
    if let Command::Config { action } = command {
        return run_config(cli, action, &path);
    }

    let config = load(cli);

    match command {
        Command::Waybar { short } => {
            commands::waybar::run(config, short).await;
            Ok(())
        }
        Command::Today => commands::today::run(&config?).await,
        Command::Next => commands::next::run(&config?).await,
        Command::Notify => commands::notify::run(&config?).await,
        Command::Serve => commands::serve::run(&config?).await,
        Command::Config { .. } => Ok(()),
    }
}

/// Loads the configuration file and applies flag overrides.
fn load(cli: &Cli) -> ClientResult<Config> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn run_config(cli: &Cli, action: ConfigAction, path: &Path) -> ClientResult<()> {
    match action {
        ConfigAction::Init => {
            let mut ui = StdioInteractor::stdio();
            commands::config::init(path, &mut ui).map(|_| ())
        }
        ConfigAction::Show => commands::config::show(path, &load(cli)?),
        ConfigAction::Path => commands::config::path(path),
    }
}
