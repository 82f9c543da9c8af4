use std::path::PathBuf;

use clap::{Parser, Subcommand};
use momentum_core::config::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

use crate::cli::{OnboardArgs, PlanCommands, ProfileCommands, ResourceCommands, WeekCommands};

/// Guided hobby learning plans in the terminal
///
/// Momentum asks four onboarding questions, fetches an AI-generated
/// week-by-week learning plan for your hobby, and tracks which weeks you
/// have completed. Weeks unlock in order: a week can only be ticked off once
/// every earlier week is done.
#[derive(Parser)]
#[command(version, about, name = "momentum")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/momentum/momentum.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Learning plan generator endpoint
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Seconds to wait for the plan generator
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Reopening a week also reopens every later week
    #[arg(long, global = true)]
    pub cascade: bool,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Momentum CLI
///
/// Without a command an overview of the profile, progress and last opened
/// resource is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Answer the onboarding questions
    Onboard(OnboardArgs),
    /// Show or edit the learning profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Show or regenerate the learning plan
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// List or tick off weeks
    #[command(alias = "w")]
    Week {
        #[command(subcommand)]
        command: WeekCommands,
    },
    /// Open plan resources and continue where you left off
    #[command(alias = "r")]
    Resource {
        #[command(subcommand)]
        command: ResourceCommands,
    },
}
