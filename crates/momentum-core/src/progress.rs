//! Week completion tracking with a sequential unlock gate.
//!
//! Week *i* may be toggled only while every earlier week is completed.
//! The aggregate progress is always derived from the week list; the stored
//! `progress` value is written for other readers but never trusted on load.

use std::fmt;

use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::{
    error::{MomentumError, Result},
    models::{numbered_weeks, progress_percent, Week, DEFAULT_WEEK_COUNT},
    store::{keys, KeyValueStore, StoreReadExt},
};

/// What happens to later weeks when an earlier week is marked incomplete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UncompletePolicy {
    /// Later weeks keep their flags and only become locked.
    #[default]
    GateOnly,
    /// Later weeks are marked incomplete too.
    Cascade,
}

impl fmt::Display for UncompletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UncompletePolicy::GateOnly => write!(f, "gate-only"),
            UncompletePolicy::Cascade => write!(f, "cascade"),
        }
    }
}

/// Outcome of [`ProgressTracker::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    Completed {
        week: Week,
        progress: u8,
    },
    Reopened {
        week: Week,
        progress: u8,
        /// Later weeks cleared by [`UncompletePolicy::Cascade`]
        cleared: usize,
    },
    /// The week is not eligible yet; nothing changed.
    Locked {
        week: Week,
        /// Name of the first incomplete earlier week
        blocked_by: String,
    },
}

impl Toggle {
    pub fn is_locked(&self) -> bool {
        matches!(self, Toggle::Locked { .. })
    }
}

/// Owner of the `weeks` and `progress` keys.
pub struct ProgressTracker<S> {
    store: S,
    policy: UncompletePolicy,
    weeks: Mutex<Vec<Week>>,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    pub fn new(store: S, policy: UncompletePolicy) -> Self {
        Self {
            store,
            policy,
            weeks: Mutex::new(numbered_weeks(DEFAULT_WEEK_COUNT)),
        }
    }

    /// Reads the stored week list, falling back to the default weeks when it
    /// is missing, unreadable or empty.
    pub async fn load(&self) -> Vec<Week> {
        let weeks = self
            .store
            .get_json::<Vec<Week>>(keys::WEEKS)
            .await
            .filter(|weeks| !weeks.is_empty())
            .unwrap_or_else(|| numbered_weeks(DEFAULT_WEEK_COUNT));

        debug!(
            "Loaded {} weeks ({}% complete)",
            weeks.len(),
            progress_percent(&weeks)
        );
        *self.weeks.lock().await = weeks.clone();
        weeks
    }

    pub async fn weeks(&self) -> Vec<Week> {
        self.weeks.lock().await.clone()
    }

    pub async fn progress(&self) -> u8 {
        progress_percent(&self.weeks.lock().await)
    }

    /// Whether the week at 0-based `index` may be toggled.
    pub async fn is_eligible(&self, index: usize) -> bool {
        let weeks = self.weeks.lock().await;
        index < weeks.len() && blocking_week(&weeks, index).is_none()
    }

    /// Whether every week is completed.
    pub async fn is_finished(&self) -> bool {
        let weeks = self.weeks.lock().await;
        !weeks.is_empty() && weeks.iter().all(|week| week.completed)
    }

    /// Flips the completion flag of the week with the given id.
    ///
    /// The week list is persisted first, then the progress value. When the
    /// week list cannot be written nothing changes; a failed progress write
    /// only logs, since the value is derived from the week list.
    ///
    /// # Errors
    ///
    /// Returns `MomentumError::WeekNotFound` for an unknown id, or the storage
    /// error of a failed week list write.
    pub async fn toggle(&self, week_id: &str) -> Result<Toggle> {
        let mut weeks = self.weeks.lock().await;
        let index = weeks
            .iter()
            .position(|week| week.id == week_id)
            .ok_or_else(|| MomentumError::WeekNotFound {
                id: week_id.to_string(),
            })?;

        if let Some(blocker) = blocking_week(&weeks, index) {
            debug!("{} is locked behind {}", weeks[index].name, blocker.name);
            return Ok(Toggle::Locked {
                week: weeks[index].clone(),
                blocked_by: blocker.name.clone(),
            });
        }

        let mut next = weeks.clone();
        let completed = !next[index].completed;
        next[index].completed = completed;

        let mut cleared = 0;
        if !completed && self.policy == UncompletePolicy::Cascade {
            for later in next.iter_mut().skip(index + 1).filter(|week| week.completed) {
                later.completed = false;
                cleared += 1;
            }
        }

        let progress = progress_percent(&next);
        self.store.set_json(keys::WEEKS, &next).await?;
        *weeks = next;
        let week = weeks[index].clone();
        drop(weeks);

        info!(
            "Marked {} as {} ({progress}% complete)",
            week.name,
            if completed { "completed" } else { "incomplete" }
        );
        self.persist_progress(progress).await;

        Ok(if completed {
            Toggle::Completed { week, progress }
        } else {
            Toggle::Reopened {
                week,
                progress,
                cleared,
            }
        })
    }

    /// Resizes the week list to match a plan with `week_count` weeks,
    /// keeping the flags of weeks that survive. Returns whether anything
    /// changed.
    pub async fn align_to_plan(&self, week_count: usize) -> Result<bool> {
        let mut weeks = self.weeks.lock().await;
        if week_count == 0 || week_count == weeks.len() {
            return Ok(false);
        }

        let next = (0..week_count)
            .map(|index| {
                let mut week = Week::numbered(index);
                week.completed = weeks.get(index).is_some_and(|old| old.completed);
                week
            })
            .collect::<Vec<_>>();

        self.store.set_json(keys::WEEKS, &next).await?;
        info!("Tracking {} weeks (was {})", next.len(), weeks.len());
        *weeks = next;
        let progress = progress_percent(&weeks);
        drop(weeks);

        self.persist_progress(progress).await;
        Ok(true)
    }

    async fn persist_progress(&self, progress: u8) {
        if let Err(e) = self.store.set(keys::PROGRESS, &progress.to_string()).await {
            warn!("Failed to store progress ({progress}%): {e}");
        }
    }
}

fn blocking_week(weeks: &[Week], index: usize) -> Option<&Week> {
    weeks[..index].iter().find(|week| !week.completed)
}
