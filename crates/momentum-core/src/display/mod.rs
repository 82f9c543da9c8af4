//! Display formatting for models, collections and operation outcomes.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds wrappers for the cases where the same data is shown
//! differently depending on context.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │ (Profile, Plan) │───▶│ Outcome Types   │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! All output is markdown so the CLI can render it with termimad.
//!
//! ## Module Organization
//!
//! - [`collections`]: Week list wrapper ([`Weeks`])
//! - [`outcomes`]: Results of plan loads, toggles and profile updates
//! - [`status`]: Status and confirmation messages ([`OperationStatus`])
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use momentum_core::{display::Weeks, models::numbered_weeks};
//!
//! let mut weeks = numbered_weeks(4);
//! weeks[0].completed = true;
//!
//! let output = Weeks(weeks).to_string();
//! assert!(output.contains("25% complete"));
//! assert!(output.contains("[x] Week 1"));
//! ```

pub mod collections;
pub mod models;
pub mod outcomes;
pub mod status;

pub use collections::Weeks;
pub use outcomes::{PlanView, UpdateResult};
pub use status::OperationStatus;
