use benchtoolbox::settings::ToolboxSettings;
use benchtoolbox::suite::SuiteDefinition;
use benchtoolbox::whatif::WhatifFilter;
use clap::Parser;
use colored::*;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let whatif = Rc::new(WhatifFilter::new());

    // -w/--whatif never reaches clap
    let mut args = std::env::args();
    let bin = args.next().unwrap_or_else(|| "benchtoolbox".to_string());
    let args = whatif.preparse_console_arguments(args.collect());
    let cli = Cli::parse_from(std::iter::once(bin).chain(args));

    init_tracing(cli.debug);
    if cli.debug {
        eprintln!("{} {:?}", "DEBUG:".yellow(), cli);
    }

    let settings = ToolboxSettings::load()?;
    let suite = SuiteDefinition::load(&cli.suite)?;
    let config = commands::build_config(&cli, &settings, &whatif)?;

    if let Some(mode) = cli.list {
        whatif.set_enabled(false);
        commands::list_benchmarks(&suite, &config, mode);
        return Ok(());
    }

    commands::run_suite(&cli, &suite, config, &whatif).await
}
