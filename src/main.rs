mod catalog;
mod cli;
mod commands;
mod copier;
mod file_utils;
mod logger;
mod menu;
mod merger;
mod names;
mod natural_sort;
mod sheet;

use crate::{
    cli::{CatalogConfig, Cli, OutputConfig},
    commands::Request,
    logger::Logger,
    menu::TerminalPrompter,
};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new(OutputConfig::from_cli(&cli));
    let config = CatalogConfig::from_cli(&cli);
    logger.debug(&format!("Output directory: {}", config.output_dir.display()));

    // No subcommand (or `menu`) runs the interactive loop
    match cli.command.and_then(Request::from_command) {
        Some(request) => commands::execute(&request, &config, &logger)?,
        None => menu::run(&mut TerminalPrompter, &config, &logger)?,
    }

    Ok(())
}
