//! Learning plan cache controller.
//!
//! [`PlanCache`] decides whether the plan already in memory, the plan cached
//! in storage, or a freshly generated plan answers a request:
//!
//! ```text
//!   get_plan(profile)
//!        │
//!        ├─ clean + memory plan for this profile ────────▶ Memory
//!        │
//!        ├─ learningPlan record, fingerprint == profile
//!        │      ├─ text parses ──────────────────────────▶ Cache
//!        │      └─ corrupted ── remove record ──┐
//!        │                                      ▼
//!        └─ profile complete ── generator ── normalize ──▶ Network
//!                                                (record persisted)
//! ```
//!
//! Failures never replace the plan already in memory; they are recorded as
//! the last error and returned to the caller. There is no automatic retry.
//!
//! At most one fetch runs at a time. A second overlapping request fails with
//! [`MomentumError::FetchInProgress`]. Invalidations that land while a fetch
//! is outstanding keep the cache dirty: the fetched plan is still stored under
//! the fingerprint it was generated for, and the next request revalidates.

use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Duration,
};

use jiff::Timestamp;
use log::{debug, error, info, warn};
use tokio::sync::Mutex;

use crate::{
    config::DEFAULT_TIMEOUT_SECS,
    error::{MomentumError, Result},
    models::{CachedPlanRecord, PlanPayload, Profile},
    store::{keys, KeyValueStore, StoreReadExt},
};

pub mod extract;
pub mod generator;


pub use extract::{
    normalize_response, ExplanationPrefix, ExtractedPlan, ExtractionStrategy, Extractor,
    FencedJsonBlock,
};
pub use generator::{HttpPlanGenerator, PlanGenerator};

/// Where a returned plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    /// Already adopted and still clean
    Memory,
    /// Read back from the `learningPlan` record
    Cache,
    /// Generated by the remote service during this call
    Network,
}

/// A plan returned by [`PlanCache::get_plan`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPlan {
    pub plan: PlanPayload,
    pub source: PlanSource,
}

/// Snapshot of the controller for rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanState {
    /// Current plan, kept across failed refreshes
    pub plan: Option<PlanPayload>,
    /// The plan must be revalidated before it is trusted again
    pub dirty: bool,
    /// A fetch is outstanding
    pub loading: bool,
    /// Message of the most recent failure, cleared by the next success
    pub last_error: Option<String>,
}

#[derive(Debug, Default)]
struct Slots {
    plan: Option<PlanPayload>,
    /// Profile the in-memory plan was generated for
    fingerprint: Option<Profile>,
    dirty: bool,
    last_error: Option<String>,
}

/// Clears the in-flight flag on every exit path.
struct FetchGuard<'a>(&'a AtomicBool);

impl<'a> FetchGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Fetch-vs-reuse controller and sole owner of the `learningPlan` key.
pub struct PlanCache<S, G> {
    store: S,
    generator: G,
    extractor: Extractor,
    timeout: Duration,
    slots: Mutex<Slots>,
    in_flight: AtomicBool,
    /// Bumped by every invalidation so a fetch can tell whether the profile
    /// moved underneath it.
    epoch: AtomicU64,
}

impl<S: KeyValueStore, G: PlanGenerator> PlanCache<S, G> {
    /// Creates a controller with the default extraction strategies.
    pub fn new(store: S, generator: G) -> Self {
        Self {
            store,
            generator,
            extractor: Extractor::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            slots: Mutex::new(Slots {
                dirty: true,
                ..Slots::default()
            }),
            in_flight: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
        }
    }

    /// Replaces the extraction strategies.
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Bounds every generator call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Returns a usable plan for `profile`, fetching only when needed.
    ///
    /// # Errors
    ///
    /// - `FetchInProgress` when another fetch is outstanding
    /// - `ProfileIncomplete` when a fetch is needed but a field is blank
    /// - `Generator`, `GeneratorTimeout`, `InvalidPlan` when fetching fails
    pub async fn get_plan(&self, profile: &Profile) -> Result<LoadedPlan> {
        {
            let slots = self.slots.lock().await;
            if !slots.dirty && slots.fingerprint.as_ref() == Some(profile) {
                if let Some(plan) = slots.plan.as_ref().filter(|plan| plan.is_usable()) {
                    return Ok(LoadedPlan {
                        plan: plan.clone(),
                        source: PlanSource::Memory,
                    });
                }
            }
        }

        let _guard = FetchGuard::acquire(&self.in_flight).ok_or(MomentumError::FetchInProgress)?;
        let epoch = self.epoch.load(Ordering::Acquire);

        if let Some(plan) = self.read_cached(profile).await {
            debug!("Serving cached learning plan for '{}'", profile.hobby_name);
            self.adopt(plan.clone(), profile, epoch).await;
            return Ok(LoadedPlan {
                plan,
                source: PlanSource::Cache,
            });
        }

        match self.fetch(profile).await {
            Ok(extracted) => {
                self.persist(&extracted.text, profile).await;
                self.adopt(extracted.plan.clone(), profile, epoch).await;
                Ok(LoadedPlan {
                    plan: extracted.plan,
                    source: PlanSource::Network,
                })
            }
            Err(e) => {
                error!("Failed to load learning plan: {e}");
                self.slots.lock().await.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Drops the stored record and forces revalidation, then loads again.
    pub async fn refresh(&self, profile: &Profile) -> Result<LoadedPlan> {
        self.invalidate().await?;
        self.get_plan(profile).await
    }

    /// Removes the stored record and marks the plan dirty.
    ///
    /// The dirty flag is set even when the removal fails; the error is still
    /// returned.
    pub async fn invalidate(&self) -> Result<()> {
        self.epoch.fetch_add(1, Ordering::AcqRel);

        let removed = self.store.remove(keys::LEARNING_PLAN).await;
        if let Err(e) = &removed {
            warn!("Failed to remove cached learning plan: {e}");
        }

        self.slots.lock().await.dirty = true;
        removed
    }

    /// Current state for rendering.
    pub async fn state(&self) -> PlanState {
        let slots = self.slots.lock().await;
        PlanState {
            plan: slots.plan.clone(),
            dirty: slots.dirty,
            loading: self.in_flight.load(Ordering::Acquire),
            last_error: slots.last_error.clone(),
        }
    }

    /// Reads the stored record if it was generated for `profile`. Corrupted
    /// records are removed.
    async fn read_cached(&self, profile: &Profile) -> Option<PlanPayload> {
        let raw = self.store.get_or_absent(keys::LEARNING_PLAN).await?;

        let record: CachedPlanRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("Cached learning plan record is unreadable, discarding it: {e}");
                self.evict().await;
                return None;
            }
        };

        if !record.matches(profile) {
            debug!("Cached learning plan was generated for a different profile");
            return None;
        }

        let parsed = record
            .plan_text()
            .ok_or_else(|| MomentumError::invalid_plan("record has no content"))
            .and_then(PlanPayload::parse);

        match parsed {
            Ok(plan) => Some(plan),
            Err(e) => {
                warn!("Cached learning plan is corrupted, discarding it: {e}");
                self.evict().await;
                None
            }
        }
    }

    async fn fetch(&self, profile: &Profile) -> Result<ExtractedPlan> {
        let missing = profile.missing_fields();
        if !missing.is_empty() {
            let missing = missing
                .iter()
                .map(|field| field.key())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(MomentumError::ProfileIncomplete { missing });
        }

        info!("Fetching learning plan for '{}'", profile.hobby_name);
        let body = tokio::time::timeout(self.timeout, self.generator.generate(profile))
            .await
            .map_err(|_| MomentumError::GeneratorTimeout {
                seconds: self.timeout.as_secs(),
            })??;

        normalize_response(&body, &self.extractor)
    }

    /// Stores a freshly generated plan. A failed write is logged and the plan
    /// is still adopted in memory.
    async fn persist(&self, text: &str, profile: &Profile) {
        let record = CachedPlanRecord::new(text, profile.clone(), Timestamp::now());
        let written = match serde_json::to_string(&record) {
            Ok(raw) => self.store.set(keys::LEARNING_PLAN, &raw).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = written {
            warn!("Failed to cache learning plan: {e}");
        }
    }

    async fn evict(&self) {
        if let Err(e) = self.store.remove(keys::LEARNING_PLAN).await {
            warn!("Failed to remove corrupted learning plan: {e}");
        }
    }

    async fn adopt(&self, plan: PlanPayload, profile: &Profile, epoch: u64) {
        let mut slots = self.slots.lock().await;
        slots.plan = Some(plan);
        slots.fingerprint = Some(profile.clone());
        slots.last_error = None;
        // An invalidation during the fetch keeps the plan dirty
        if self.epoch.load(Ordering::Acquire) == epoch {
            slots.dirty = false;
        }
    }
}
