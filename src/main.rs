mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod session;
mod store;
mod utils;

use clap::Parser;

use cli::Cli;
use config::{Config, Settings};

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    // RUST_LOG still overrides the flag-derived level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() {
    let config = Config::load();
    let cli = Cli::parse().with_config(&config);

    init_logging(cli.debug);
    if let Some(path) = &config.loaded_from {
        log::debug!("Loaded config from {}", path.display());
    }

    let settings = match Settings::resolve(cli.log_path.clone(), cli.goal.as_deref(), &config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = app::run(&cli, &settings) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
