//! Data models for profiles, plans, progress and resources.
//!
//! This module contains the domain models shared by the components. Display
//! implementations for these models are located in [`crate::display::models`]
//! to keep data structures separate from presentation logic.
//!
//! Every model that is persisted derives `Serialize`/`Deserialize` with the
//! camelCase wire names the stored records use, so a record written by one
//! version of the app decodes in the next.
//!
//! # Examples
//!
//! ```rust
//! use momentum_core::models::{Profile, ProfileField};
//!
//! let mut profile = Profile::default();
//! profile.set(ProfileField::HobbyName, "Watercolor".to_string());
//! assert!(!profile.is_complete());
//! assert_eq!(
//!     profile.missing_fields(),
//!     vec![
//!         ProfileField::CurrentSkillLevel,
//!         ProfileField::DesiredSkillLevel,
//!         ProfileField::TimeCommitment,
//!     ]
//! );
//! ```

pub mod cache;
pub mod levels;
pub mod plan;
pub mod profile;
pub mod resource;
pub mod week;


pub use cache::{CachedPlanRecord, ContentBlock, CACHE_RECORD_VERSION};
pub use levels::{option_label, GoalLevel, SkillLevel, TimeCommitment};
pub use plan::{PlanPayload, ResourceItem, WeekPlan};
pub use profile::{Profile, ProfileField};
pub use resource::{LastViewedResource, ResourceKind};
pub use week::{numbered_weeks, progress_percent, Week, DEFAULT_WEEK_COUNT};
