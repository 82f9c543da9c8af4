//! Profile store: the onboarding answers and the onboarding flag.

use log::{debug, warn};
use tokio::sync::Mutex;

use crate::{
    error::{MomentumError, Result},
    models::{Profile, ProfileField},
    params::ProfileUpdate,
    store::{keys, KeyValueStore, StoreReadExt},
};

const TRUE: &str = "true";

/// Owner of the four profile keys and `onboardingCompleted`.
pub struct ProfileStore<S> {
    store: S,
    profile: Mutex<Profile>,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Creates a store with an empty in-memory profile; call
    /// [`ProfileStore::load`] to read persisted values.
    pub fn new(store: S) -> Self {
        Self {
            store,
            profile: Mutex::new(Profile::default()),
        }
    }

    /// Reads the four profile fields. Missing or unreadable fields load as
    /// empty strings.
    pub async fn load(&self) -> Profile {
        let mut loaded = Profile::default();
        for field in ProfileField::ALL {
            if let Some(value) = self.store.get_or_absent(field.key()).await {
                loaded.set(field, value);
            }
        }
        debug!(
            "Loaded profile (complete: {}, hobby: '{}')",
            loaded.is_complete(),
            loaded.hobby_name
        );

        *self.profile.lock().await = loaded.clone();
        loaded
    }

    /// Snapshot of the in-memory profile.
    pub async fn profile(&self) -> Profile {
        self.profile.lock().await.clone()
    }

    pub async fn is_complete(&self) -> bool {
        self.profile.lock().await.is_complete()
    }

    /// Writes the provided fields one by one in onboarding order.
    ///
    /// Each successful write is applied to the in-memory profile right away.
    /// The first failed write stops the update and is returned; fields
    /// written before it stay written.
    pub async fn update(&self, update: &ProfileUpdate) -> Result<Profile> {
        for (field, value) in update.fields() {
            if let Err(e) = self.store.set(field.key(), value).await {
                warn!("Failed to save profile field '{}': {e}", field.key());
                return Err(e);
            }
            self.profile.lock().await.set(field, value.to_string());
        }
        Ok(self.profile().await)
    }

    /// Saves the answer of onboarding step `step` (1-4). Saving the final
    /// step also marks onboarding completed.
    ///
    /// # Errors
    ///
    /// Returns `MomentumError::InvalidInput` for an unknown step or a blank
    /// value, or the storage error of a failed write.
    pub async fn save_onboarding_step(&self, step: u8, value: &str) -> Result<ProfileField> {
        let field = ProfileField::from_onboarding_step(step).ok_or_else(|| {
            MomentumError::invalid_input("step")
                .with_reason(format!("onboarding has steps 1-4, got {step}"))
        })?;

        let value = value.trim();
        if value.is_empty() {
            return Err(MomentumError::invalid_input(field.key()).with_reason("cannot be empty"));
        }

        self.update(&ProfileUpdate::single(field, value)).await?;
        if field.is_final_step() {
            self.complete_onboarding().await?;
        }
        Ok(field)
    }

    pub async fn complete_onboarding(&self) -> Result<()> {
        self.store.set(keys::ONBOARDING_COMPLETED, TRUE).await
    }

    /// Whether the final onboarding step was ever saved. Unreadable flags
    /// count as not completed.
    pub async fn onboarding_completed(&self) -> bool {
        self.store
            .get_or_absent(keys::ONBOARDING_COMPLETED)
            .await
            .is_some_and(|flag| flag == TRUE)
    }
}
