//! Command definitions and their handlers.
//!
//! Argument structs carry the clap derives and convert into the core's
//! parameter types, so the core stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Momentum session
//! ```
//!
//! Level options are parsed with the core's `FromStr` impls, so an unknown
//! option id is rejected before anything is written.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use log::debug;
use momentum_core::{
    display::{OperationStatus, PlanView, UpdateResult, Weeks},
    params::ProfileUpdate,
    GoalLevel, LastViewedResource, Momentum, ResourceItem, ResourceKind, SkillLevel,
    TimeCommitment, Toggle,
};

use crate::renderer::TerminalRenderer;

/// Answer all four onboarding questions at once
#[derive(Args)]
pub struct OnboardArgs {
    /// Hobby you want to learn
    #[arg(long)]
    pub hobby: String,
    #[arg(
        long,
        help = "Where you start: beginner, some_experience, intermediate, advanced"
    )]
    pub current: SkillLevel,
    #[arg(
        long,
        help = "Where you want to get: basic, hobby, advanced, professional"
    )]
    pub goal: GoalLevel,
    #[arg(
        long,
        help = "Weekly time: casual (1-2h), regular (3-5h), dedicated (5-10h), intense (10h+)"
    )]
    pub time: TimeCommitment,
}

impl OnboardArgs {
    /// Answers in onboarding step order.
    fn answers(&self) -> [(u8, &str); 4] {
        [
            (1, self.hobby.as_str()),
            (2, self.current.as_str()),
            (3, self.goal.as_str()),
            (4, self.time.as_str()),
        ]
    }
}

/// Change one or more profile answers
///
/// Any change discards the cached learning plan; a new one is generated the
/// next time the plan is shown.
#[derive(Args)]
pub struct SetProfileArgs {
    #[arg(long, help = "New hobby")]
    pub hobby: Option<String>,
    #[arg(long, help = "New starting level")]
    pub current: Option<SkillLevel>,
    #[arg(long, help = "New goal level")]
    pub goal: Option<GoalLevel>,
    #[arg(long, help = "New weekly time commitment")]
    pub time: Option<TimeCommitment>,
}

impl From<SetProfileArgs> for ProfileUpdate {
    fn from(val: SetProfileArgs) -> Self {
        ProfileUpdate {
            hobby_name: val.hobby,
            current_skill_level: val.current.map(|level| level.as_str().to_string()),
            desired_skill_level: val.goal.map(|level| level.as_str().to_string()),
            time_commitment: val.time.map(|time| time.as_str().to_string()),
        }
    }
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the current profile
    #[command(alias = "s")]
    Show,
    /// Change one or more profile answers
    Set(SetProfileArgs),
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show the learning plan, generating it if needed
    #[command(alias = "s")]
    Show,
    /// Discard the cached plan and generate a new one
    Refresh,
}

/// Tick off or reopen a week
#[derive(Args)]
pub struct ToggleWeekArgs {
    #[arg(help = "Week id as shown by `week list`")]
    pub id: String,
}

#[derive(Subcommand)]
pub enum WeekCommands {
    /// List weeks with their completion state
    #[command(alias = "l")]
    List,
    /// Mark a week completed, or reopen a completed week
    #[command(alias = "t")]
    Toggle(ToggleWeekArgs),
}

/// Kind of plan resource
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ResourceKindArg {
    Video,
    Article,
}

impl From<ResourceKindArg> for ResourceKind {
    fn from(val: ResourceKindArg) -> Self {
        match val {
            ResourceKindArg::Video => ResourceKind::Video,
            ResourceKindArg::Article => ResourceKind::Article,
        }
    }
}

/// Open a resource of the plan and remember it
#[derive(Args)]
pub struct OpenResourceArgs {
    #[arg(long, help = "Week number, starting at 1")]
    pub week: usize,
    #[arg(long, value_enum, help = "Resource kind")]
    pub kind: ResourceKindArg,
    #[arg(long, default_value_t = 1, help = "Position in the week's list, starting at 1")]
    pub index: usize,
}

#[derive(Subcommand)]
pub enum ResourceCommands {
    /// Open a resource of the plan and remember it
    #[command(alias = "o")]
    Open(OpenResourceArgs),
    /// Show the last opened resource
    Last,
}

/// Runs commands against a session and renders the results.
pub struct Cli {
    momentum: Momentum,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(momentum: Momentum, renderer: TerminalRenderer) -> Self {
        Self { momentum, renderer }
    }

    /// Profile, progress and the last opened resource.
    pub async fn overview(&self) -> Result<()> {
        let overview = self.momentum.load().await;

        let mut output = String::from("# Momentum\n\n");
        if !overview.onboarding_completed && !overview.profile.is_complete() {
            output.push_str("Run `momentum onboard` to set up your learning profile.\n");
            return self.renderer.render(&output);
        }

        output.push_str(&overview.profile.to_string());
        output.push_str("\n## Progress\n\n");
        output.push_str(&Weeks(overview.weeks).to_string());
        if let Some(resource) = &overview.last_resource {
            output.push('\n');
            output.push_str(&resource.to_string());
        }
        self.renderer.render(&output)
    }

    pub async fn handle_onboard(&self, args: OnboardArgs) -> Result<()> {
        self.momentum.load().await;
        for (step, value) in args.answers() {
            let field = self
                .momentum
                .save_onboarding_step(step, value)
                .await
                .with_context(|| format!("Failed to save onboarding step {step}"))?;
            debug!("Saved onboarding step {step} ({field})");
        }

        let profile = self.momentum.profile().await;
        let status = OperationStatus::success("Onboarding completed");
        self.renderer.render(&format!(
            "{status}\n{profile}\nRun `momentum plan show` to get your learning plan.\n"
        ))
    }

    pub async fn handle_profile_command(&self, command: ProfileCommands) -> Result<()> {
        self.momentum.load().await;
        match command {
            ProfileCommands::Show => {
                let profile = self.momentum.profile().await;
                self.renderer.render(&profile.to_string())
            }
            ProfileCommands::Set(args) => {
                let update = ProfileUpdate::from(args);
                if !update.touches_plan() {
                    return Err(anyhow!(
                        "Nothing to update: pass at least one of --hobby, --current, --goal, --time"
                    ));
                }
                let profile = self
                    .momentum
                    .update_profile(&update)
                    .await
                    .context("Failed to update profile")?;
                self.renderer
                    .render(&UpdateResult::from_update(profile, &update).to_string())
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        self.momentum.load().await;
        let loaded = match command {
            PlanCommands::Show => self.momentum.get_plan().await,
            PlanCommands::Refresh => self.momentum.refresh_plan().await,
        }
        .map_err(|e| {
            let hint = if e.is_fetch_failure() {
                " (run `momentum plan refresh` to retry)"
            } else {
                ""
            };
            anyhow::Error::new(e).context(format!("Failed to load learning plan{hint}"))
        })?;

        let profile = self.momentum.profile().await;
        let mut output = PlanView::new(&loaded, &profile.hobby_name).to_string();
        output.push_str("\n## Progress\n\n");
        output.push_str(&Weeks(self.momentum.weeks().await).to_string());
        self.renderer.render(&output)
    }

    pub async fn handle_week_command(&self, command: WeekCommands) -> Result<()> {
        self.momentum.load().await;
        match command {
            WeekCommands::List => {
                let weeks = Weeks(self.momentum.weeks().await);
                self.renderer.render(&weeks.to_string())
            }
            WeekCommands::Toggle(args) => {
                let toggle = self
                    .momentum
                    .toggle_week(&args.id)
                    .await
                    .with_context(|| format!("Failed to toggle week '{}'", args.id))?;

                let status = match &toggle {
                    Toggle::Locked { .. } => OperationStatus::notice(toggle.to_string().trim()),
                    _ => OperationStatus::success(toggle.to_string().trim()),
                };
                let weeks = Weeks(self.momentum.weeks().await);
                self.renderer.render(&format!("{status}\n{weeks}"))
            }
        }
    }

    pub async fn handle_resource_command(&self, command: ResourceCommands) -> Result<()> {
        self.momentum.load().await;
        match command {
            ResourceCommands::Open(args) => self.open_resource(args).await,
            ResourceCommands::Last => match self.momentum.last_resource().await {
                Some(resource) => self.renderer.render(&resource.to_string()),
                None => self
                    .renderer
                    .render(&OperationStatus::notice("No resource opened yet").to_string()),
            },
        }
    }

    async fn open_resource(&self, args: OpenResourceArgs) -> Result<()> {
        let loaded = self
            .momentum
            .get_plan()
            .await
            .context("Failed to load learning plan")?;

        let week_plan = args
            .week
            .checked_sub(1)
            .and_then(|index| loaded.plan.weeks.get(index))
            .ok_or_else(|| {
                anyhow!(
                    "Week {} does not exist, the plan has {} weeks",
                    args.week,
                    loaded.plan.week_count()
                )
            })?;

        let kind = ResourceKind::from(args.kind);
        let items: &[ResourceItem] = match kind {
            ResourceKind::Video => &week_plan.youtube_videos,
            ResourceKind::Article => &week_plan.learning_articles,
        };
        let item = args
            .index
            .checked_sub(1)
            .and_then(|index| items.get(index))
            .ok_or_else(|| {
                anyhow!(
                    "{} has no {kind} #{} ({} available)",
                    week_plan.week,
                    args.index,
                    items.len()
                )
            })?;

        let resource = LastViewedResource {
            kind,
            title: item.title.clone(),
            url: item.url.clone(),
            week_index: args.week - 1,
        };
        self.momentum
            .record_resource(&resource)
            .await
            .context("Failed to remember resource")?;

        self.renderer
            .render(&format!("Opening {item}\n\n{}\n", resource.url))
    }
}
