//! Aisle - A static generator for category landing pages.

#![allow(dead_code)]

mod cli;
mod config;
mod embed;
mod generator;
mod logger;
mod page;
mod search;
mod stream;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_site, query::run_query};
use config::SiteConfig;
use page::CategoryTemplate;
use search::HeadlessSearcher;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;
    let searcher = HeadlessSearcher::new(config.search.clone());
    let template = CategoryTemplate::new(&config.site, &searcher);

    match &cli.command {
        Commands::Build { .. } => build_site(&config, &template).map(|_| ()),
        Commands::Query { args } => run_query(args, &config, &template),
    }
}
