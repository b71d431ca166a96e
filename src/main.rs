//! Bifurcate CLI entry point.

use clap::Parser;

use bifurcate::cli::commands;
use bifurcate::cli::{handle_error, Cli, Commands};
use bifurcate::infrastructure::config::ConfigLoader;
use bifurcate::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }

    // Held until exit so buffered file output is flushed.
    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args, config, cli.json).await,
        Commands::Config(cmd) => commands::config::execute(cmd, config, cli.json),
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
