mod cli;
mod clipboard;
mod error;
mod fmt;
mod range;
mod reconciler;
mod record;
mod settings;
mod store;

use clap::Parser;
use colored::Colorize;

use cli::Cli;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let settings = settings::load_settings();
    log::debug!("Using settings {settings:?}");

    let result = if cli.list {
        cli::list::run(&settings.resolve_store_path(cli.file.as_deref()))
    } else if cli.init_config {
        cli::config::run(&settings)
    } else {
        cli::calc::run(&cli, &settings)
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}
