//! Parameter structures for momentum operations
//!
//! These structures are shared by every interface (the CLI today, a mobile
//! bridge tomorrow) and carry no framework-specific derives. Interface layers
//! define their own argument types and convert into these via `From`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │    Momentum     │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use crate::models::{Profile, ProfileField};

/// Partial profile update. `None` fields are left untouched.
///
/// # Examples
///
/// ```rust
/// use momentum_core::params::ProfileUpdate;
///
/// let update = ProfileUpdate {
///     hobby_name: Some("Pottery".to_string()),
///     ..Default::default()
/// };
/// assert!(update.touches_plan());
/// assert!(!ProfileUpdate::default().touches_plan());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub hobby_name: Option<String>,
    pub current_skill_level: Option<String>,
    pub desired_skill_level: Option<String>,
    pub time_commitment: Option<String>,
}

impl ProfileUpdate {
    /// Update that sets a single field.
    pub fn single(field: ProfileField, value: impl Into<String>) -> Self {
        let mut update = Self::default();
        *update.slot_mut(field) = Some(value.into());
        update
    }

    /// Update that overwrites every field with the given profile.
    pub fn replace_with(profile: Profile) -> Self {
        Self {
            hobby_name: Some(profile.hobby_name),
            current_skill_level: Some(profile.current_skill_level),
            desired_skill_level: Some(profile.desired_skill_level),
            time_commitment: Some(profile.time_commitment),
        }
    }

    /// Provided fields in onboarding order.
    pub fn fields(&self) -> Vec<(ProfileField, &str)> {
        ProfileField::ALL
            .into_iter()
            .filter_map(|field| self.slot(field).as_deref().map(|value| (field, value)))
            .collect()
    }

    /// Whether any plan-relevant field is included, changed or not.
    pub fn touches_plan(&self) -> bool {
        ProfileField::ALL
            .into_iter()
            .any(|field| self.slot(field).is_some())
    }

    fn slot(&self, field: ProfileField) -> &Option<String> {
        match field {
            ProfileField::HobbyName => &self.hobby_name,
            ProfileField::CurrentSkillLevel => &self.current_skill_level,
            ProfileField::DesiredSkillLevel => &self.desired_skill_level,
            ProfileField::TimeCommitment => &self.time_commitment,
        }
    }

    fn slot_mut(&mut self, field: ProfileField) -> &mut Option<String> {
        match field {
            ProfileField::HobbyName => &mut self.hobby_name,
            ProfileField::CurrentSkillLevel => &mut self.current_skill_level,
            ProfileField::DesiredSkillLevel => &mut self.desired_skill_level,
            ProfileField::TimeCommitment => &mut self.time_commitment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_in_onboarding_order() {
        let update = ProfileUpdate {
            time_commitment: Some("casual".to_string()),
            hobby_name: Some("Chess".to_string()),
            ..Default::default()
        };

        assert_eq!(
            update.fields(),
            vec![
                (ProfileField::HobbyName, "Chess"),
                (ProfileField::TimeCommitment, "casual"),
            ]
        );
    }

    #[test]
    fn test_single_and_replace() {
        let update = ProfileUpdate::single(ProfileField::DesiredSkillLevel, "advanced");
        assert_eq!(update.desired_skill_level.as_deref(), Some("advanced"));
        assert_eq!(update.fields().len(), 1);

        let update = ProfileUpdate::replace_with(Profile::default());
        assert_eq!(update.fields().len(), 4);
        assert!(update.touches_plan());
    }
}
