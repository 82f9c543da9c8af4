//! Momentum CLI Application
//!
//! Command-line interface for onboarding, learning plans and week progress.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use momentum_core::{GeneratorConfig, MomentumBuilder, UncompletePolicy};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        endpoint,
        timeout_secs,
        cascade,
        no_color,
        command,
    } = Args::parse();

    let policy = if cascade {
        UncompletePolicy::Cascade
    } else {
        UncompletePolicy::GateOnly
    };

    let momentum = MomentumBuilder::new()
        .with_database_path(database_file)
        .with_generator_config(GeneratorConfig {
            endpoint,
            timeout_secs,
        })
        .with_uncomplete_policy(policy)
        .build()
        .await
        .context("Failed to initialize momentum")?;

    let cli = Cli::new(momentum, TerminalRenderer::new(!no_color));

    info!("Momentum started (uncomplete policy: {policy})");

    match command {
        Some(Onboard(args)) => cli.handle_onboard(args).await,
        Some(Profile { command }) => cli.handle_profile_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Week { command }) => cli.handle_week_command(command).await,
        Some(Resource { command }) => cli.handle_resource_command(command).await,
        None => cli.overview().await,
    }
}
