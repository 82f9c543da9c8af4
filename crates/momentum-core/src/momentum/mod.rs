//! The session object tying the components together.
//!
//! [`Momentum`] owns one of each component over a shared
//! [`KeyValueStore`] and is the only API interfaces talk to:
//!
//! ```text
//! ┌─────────────────────┐  update_profile  ┌─────────────────────┐
//! │    ProfileStore     │ ── invalidate ─▶ │      PlanCache      │
//! └─────────────────────┘                  └──────────┬──────────┘
//!                                                     │ fresh plan: align weeks
//! ┌─────────────────────┐                  ┌──────────▼──────────┐
//! │ LastResourceTracker │                  │   ProgressTracker   │
//! └──────────┬──────────┘                  └──────────┬──────────┘
//!            │                                        │
//!            └─────── broadcast MomentumEvent ────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use momentum_core::{MomentumBuilder, params::ProfileUpdate, Profile};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let momentum = MomentumBuilder::new()
//!     .with_database_path(Some("/tmp/momentum.db"))
//!     .build()
//!     .await?;
//! momentum.load().await;
//!
//! momentum
//!     .update_profile(&ProfileUpdate::replace_with(Profile {
//!         hobby_name: "Guitar".to_string(),
//!         current_skill_level: "beginner".to_string(),
//!         desired_skill_level: "hobby".to_string(),
//!         time_commitment: "casual".to_string(),
//!     }))
//!     .await?;
//!
//! let loaded = momentum.get_plan().await?;
//! println!("{} weeks", loaded.plan.week_count());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use log::{debug, warn};
use tokio::sync::broadcast;

use crate::{
    error::{MomentumError, Result},
    models::{LastViewedResource, Profile, ProfileField, Week},
    params::ProfileUpdate,
    plan::{HttpPlanGenerator, LoadedPlan, PlanCache, PlanGenerator, PlanSource, PlanState},
    profile::ProfileStore,
    progress::{ProgressTracker, Toggle, UncompletePolicy},
    resource::LastResourceTracker,
    store::{KeyValueStore, SqliteStore},
};

pub mod builder;

#[cfg(test)]
mod tests;

pub use builder::MomentumBuilder;

const EVENT_CAPACITY: usize = 64;

/// Change notifications published by [`Momentum`].
#[derive(Debug, Clone, PartialEq)]
pub enum MomentumEvent {
    ProfileUpdated(Profile),
    PlanLoaded { source: PlanSource, weeks: usize },
    PlanFailed { message: String },
    ProgressChanged { weeks: Vec<Week>, progress: u8 },
    ResourceRecorded(LastViewedResource),
}

/// Everything an interface needs to render after start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub profile: Profile,
    pub onboarding_completed: bool,
    pub weeks: Vec<Week>,
    pub progress: u8,
    pub last_resource: Option<LastViewedResource>,
}

/// Owned session state over a key-value store and a plan generator.
pub struct Momentum<S = SqliteStore, G = HttpPlanGenerator> {
    store: S,
    profiles: ProfileStore<S>,
    plans: PlanCache<S, G>,
    progress: ProgressTracker<S>,
    resources: LastResourceTracker<S>,
    events: broadcast::Sender<MomentumEvent>,
}

impl<S: KeyValueStore, G: PlanGenerator> Momentum<S, G> {
    /// Creates a session with the default policy and fetch timeout. Nothing
    /// is read until [`Momentum::load`].
    pub fn new(store: S, generator: G) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            profiles: ProfileStore::new(store.clone()),
            plans: PlanCache::new(store.clone(), generator),
            progress: ProgressTracker::new(store.clone(), UncompletePolicy::default()),
            resources: LastResourceTracker::new(store.clone()),
            store,
            events,
        }
    }

    pub fn with_uncomplete_policy(mut self, policy: UncompletePolicy) -> Self {
        self.progress = ProgressTracker::new(self.store.clone(), policy);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.plans = self.plans.with_timeout(timeout);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn generator(&self) -> &G {
        self.plans.generator()
    }

    /// Receives every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<MomentumEvent> {
        self.events.subscribe()
    }

    /// Reads the persisted profile, weeks and last resource.
    pub async fn load(&self) -> Overview {
        let profile = self.profiles.load().await;
        let weeks = self.progress.load().await;
        Overview {
            profile,
            onboarding_completed: self.profiles.onboarding_completed().await,
            progress: self.progress.progress().await,
            weeks,
            last_resource: self.resources.get().await,
        }
    }

    pub async fn profile(&self) -> Profile {
        self.profiles.profile().await
    }

    pub async fn onboarding_completed(&self) -> bool {
        self.profiles.onboarding_completed().await
    }

    /// Applies a partial profile update.
    ///
    /// When the update names any profile field the plan cache is invalidated,
    /// even if one of the writes failed. A write error takes precedence over
    /// an invalidation error.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        let updated = self.profiles.update(update).await;
        if update.touches_plan() {
            let invalidated = self.plans.invalidate().await;
            if updated.is_ok() {
                invalidated?;
            }
        }

        let profile = updated?;
        self.publish(MomentumEvent::ProfileUpdated(profile.clone()));
        Ok(profile)
    }

    /// Saves one onboarding answer; see [`ProfileStore::save_onboarding_step`].
    pub async fn save_onboarding_step(&self, step: u8, value: &str) -> Result<ProfileField> {
        let saved = self.profiles.save_onboarding_step(step, value).await;
        if matches!(saved, Err(MomentumError::InvalidInput { .. })) {
            return saved;
        }

        let invalidated = self.plans.invalidate().await;
        let field = saved?;
        invalidated?;

        self.publish(MomentumEvent::ProfileUpdated(self.profile().await));
        Ok(field)
    }

    /// Returns the plan for the current profile. A freshly generated plan
    /// resizes the week list to its number of weeks.
    pub async fn get_plan(&self) -> Result<LoadedPlan> {
        let profile = self.profile().await;
        let loaded = self.plans.get_plan(&profile).await;
        self.after_plan_load(loaded).await
    }

    /// Discards the cached plan and fetches a new one.
    pub async fn refresh_plan(&self) -> Result<LoadedPlan> {
        let profile = self.profile().await;
        let loaded = self.plans.refresh(&profile).await;
        self.after_plan_load(loaded).await
    }

    pub async fn plan_state(&self) -> PlanState {
        self.plans.state().await
    }

    pub async fn weeks(&self) -> Vec<Week> {
        self.progress.weeks().await
    }

    pub async fn progress(&self) -> u8 {
        self.progress.progress().await
    }

    pub async fn is_week_eligible(&self, index: usize) -> bool {
        self.progress.is_eligible(index).await
    }

    pub async fn is_finished(&self) -> bool {
        self.progress.is_finished().await
    }

    pub async fn toggle_week(&self, week_id: &str) -> Result<Toggle> {
        let toggle = self.progress.toggle(week_id).await?;
        if !toggle.is_locked() {
            self.publish_progress().await;
        }
        Ok(toggle)
    }

    pub async fn record_resource(&self, resource: &LastViewedResource) -> Result<()> {
        self.resources.record(resource).await?;
        self.publish(MomentumEvent::ResourceRecorded(resource.clone()));
        Ok(())
    }

    pub async fn last_resource(&self) -> Option<LastViewedResource> {
        self.resources.get().await
    }

    async fn after_plan_load(&self, loaded: Result<LoadedPlan>) -> Result<LoadedPlan> {
        let loaded = match loaded {
            Ok(loaded) => loaded,
            Err(MomentumError::FetchInProgress) => return Err(MomentumError::FetchInProgress),
            Err(e) => {
                self.publish(MomentumEvent::PlanFailed {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        if loaded.source == PlanSource::Memory {
            return Ok(loaded);
        }

        let weeks = loaded.plan.week_count();
        if loaded.source == PlanSource::Network {
            match self.progress.align_to_plan(weeks).await {
                Ok(true) => self.publish_progress().await,
                Ok(false) => {}
                Err(e) => warn!("Failed to resize week list to {weeks} weeks: {e}"),
            }
        }

        self.publish(MomentumEvent::PlanLoaded {
            source: loaded.source,
            weeks,
        });
        Ok(loaded)
    }

    async fn publish_progress(&self) {
        self.publish(MomentumEvent::ProgressChanged {
            weeks: self.progress.weeks().await,
            progress: self.progress.progress().await,
        });
    }

    fn publish(&self, event: MomentumEvent) {
        if self.events.send(event).is_err() {
            debug!("No subscribers for momentum event");
        }
    }
}
