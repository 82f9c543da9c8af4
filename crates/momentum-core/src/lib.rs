//! Core library for the Momentum hobby learning application.
//!
//! This crate holds the state and invariants behind onboarding, the
//! AI-generated weekly learning plan and week-by-week progress:
//!
//! - the profile that keys the plan cache ([`profile`]),
//! - the fetch-vs-reuse decision and response normalization ([`plan`]),
//! - sequential week completion ([`progress`]) and the last opened
//!   resource ([`resource`]),
//! - all of it over a pluggable key-value store ([`store`]).
//!
//! [`Momentum`] composes the components into a single session object and
//! publishes [`MomentumEvent`]s as state changes.
//!
//! # Display Architecture
//!
//! Domain models implement [`std::fmt::Display`] as markdown; the
//! [`display`] module adds contextual wrappers. The CLI renders that
//! markdown in the terminal.
//!
//! # Quick Start
//!
//! ```rust
//! use momentum_core::{
//!     params::ProfileUpdate, LastViewedResource, MemoryStore, Momentum, PlanGenerator, Profile,
//!     ResourceKind, Result,
//! };
//!
//! struct Canned;
//!
//! impl PlanGenerator for Canned {
//!     async fn generate(&self, _profile: &Profile) -> Result<String> {
//!         Ok(r#"{"weeks":[{"week":"Week 1"},{"week":"Week 2"}]}"#.to_string())
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let momentum = Momentum::new(MemoryStore::new(), Canned);
//! momentum.load().await;
//!
//! momentum
//!     .update_profile(&ProfileUpdate::replace_with(Profile {
//!         hobby_name: "Pottery".to_string(),
//!         current_skill_level: "beginner".to_string(),
//!         desired_skill_level: "hobby".to_string(),
//!         time_commitment: "regular".to_string(),
//!     }))
//!     .await?;
//!
//! let loaded = momentum.get_plan().await?;
//! assert_eq!(loaded.plan.week_count(), 2);
//! assert_eq!(momentum.weeks().await.len(), 2);
//!
//! momentum.toggle_week("1").await?;
//! assert_eq!(momentum.progress().await, 50);
//!
//! momentum
//!     .record_resource(&LastViewedResource {
//!         kind: ResourceKind::Video,
//!         title: "Centering clay".to_string(),
//!         url: "https://youtu.be/clay".to_string(),
//!         week_index: 0,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod momentum;
pub mod params;
pub mod plan;
pub mod profile;
pub mod progress;
pub mod resource;
pub mod store;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::GeneratorConfig;
pub use db::Database;
pub use display::{OperationStatus, PlanView, UpdateResult, Weeks};
pub use error::{MomentumError, Result};
pub use models::{
    CachedPlanRecord, GoalLevel, LastViewedResource, PlanPayload, Profile, ProfileField,
    ResourceItem, ResourceKind, SkillLevel, TimeCommitment, Week, WeekPlan,
};
pub use momentum::{Momentum, MomentumBuilder, MomentumEvent, Overview};
pub use params::ProfileUpdate;
pub use plan::{
    Extractor, HttpPlanGenerator, LoadedPlan, PlanCache, PlanGenerator, PlanSource, PlanState,
};
pub use progress::{Toggle, UncompletePolicy};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
