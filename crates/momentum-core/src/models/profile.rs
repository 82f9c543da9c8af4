//! Profile model definition and related functionality.

use serde::{Deserialize, Serialize};

use crate::store::keys;

/// The four onboarding answers that drive plan generation.
///
/// The whole struct doubles as the cache fingerprint: a cached plan is only
/// served while the stored snapshot equals the current profile on every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Free-text hobby the plan is about
    #[serde(default)]
    pub hobby_name: String,

    /// Skill level option id the user starts from
    #[serde(default)]
    pub current_skill_level: String,

    /// Skill level option id the user is aiming for
    #[serde(default)]
    pub desired_skill_level: String,

    /// Weekly time commitment option id
    #[serde(default)]
    pub time_commitment: String,
}

impl Profile {
    /// Whether every field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Fields that are blank after trimming, in onboarding order.
    pub fn missing_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// Value of a single field.
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::HobbyName => &self.hobby_name,
            ProfileField::CurrentSkillLevel => &self.current_skill_level,
            ProfileField::DesiredSkillLevel => &self.desired_skill_level,
            ProfileField::TimeCommitment => &self.time_commitment,
        }
    }

    /// Replaces a single field.
    pub fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::HobbyName => self.hobby_name = value,
            ProfileField::CurrentSkillLevel => self.current_skill_level = value,
            ProfileField::DesiredSkillLevel => self.desired_skill_level = value,
            ProfileField::TimeCommitment => self.time_commitment = value,
        }
    }
}

/// The plan-relevant profile fields, in onboarding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    HobbyName,
    CurrentSkillLevel,
    DesiredSkillLevel,
    TimeCommitment,
}

impl ProfileField {
    pub const ALL: [ProfileField; 4] = [
        ProfileField::HobbyName,
        ProfileField::CurrentSkillLevel,
        ProfileField::DesiredSkillLevel,
        ProfileField::TimeCommitment,
    ];

    /// Storage key (and wire name) of the field.
    pub fn key(&self) -> &'static str {
        match self {
            ProfileField::HobbyName => keys::HOBBY_NAME,
            ProfileField::CurrentSkillLevel => keys::CURRENT_SKILL_LEVEL,
            ProfileField::DesiredSkillLevel => keys::DESIRED_SKILL_LEVEL,
            ProfileField::TimeCommitment => keys::TIME_COMMITMENT,
        }
    }

    /// 1-based onboarding step that asks for this field.
    pub fn onboarding_step(&self) -> u8 {
        match self {
            ProfileField::HobbyName => 1,
            ProfileField::CurrentSkillLevel => 2,
            ProfileField::DesiredSkillLevel => 3,
            ProfileField::TimeCommitment => 4,
        }
    }

    /// Field asked at the given 1-based onboarding step.
    pub fn from_onboarding_step(step: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.onboarding_step() == step)
    }

    /// Whether this field is the last onboarding question.
    pub fn is_final_step(&self) -> bool {
        *self == ProfileField::TimeCommitment
    }
}
