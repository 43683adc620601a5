//! SmartPayMap CLI.

use std::io::{self, IsTerminal};

use anyhow::Context as _;
use clap::Parser;
use spm_cli::logging::{LogConfig, LogFormat, init_logging};
use spm_cli::settings::load_settings;
use spm_client::ClientConfig;
use spm_model::SpmError;

mod cli;
mod commands;
mod progress;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{
    Context, run_countries, run_fields, run_health, run_heatmap, run_map, run_preview,
    run_simulate, run_upload,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli, &log_config) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            if let Some(cause) = error.downcast_ref::<SpmError>() {
                let retry = if cause.is_retryable() {
                    " Retrying may help."
                } else {
                    ""
                };
                eprintln!("hint: {}{retry}", cause.user_message());
            }
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli, log_config: &LogConfig) -> anyhow::Result<()> {
    match &cli.command {
        Command::Preview(args) => return run_preview(args),
        Command::Fields => {
            run_fields();
            return Ok(());
        }
        Command::Countries => {
            run_countries();
            return Ok(());
        }
        _ => {}
    }

    let settings = load_settings(cli.api.config.as_deref())?;
    let config = ClientConfig::resolve(
        &cli.api.to_settings(),
        |key| std::env::var(key).ok(),
        &settings.api,
    )?;
    let spinner = log_config.log_file.is_some() || log_config.format != LogFormat::Json;
    let ctx = Context::new(config, spinner)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        match &cli.command {
            Command::Upload(args) => run_upload(&ctx, &args.file).await,
            Command::Map(args) => run_map(&ctx, args).await,
            Command::Heatmap(args) => run_heatmap(&ctx, args).await,
            Command::Simulate(args) => run_simulate(&ctx, args).await,
            Command::Health => run_health(&ctx).await,
            Command::Preview(_) | Command::Fields | Command::Countries => Ok(()),
        }
    })
}
