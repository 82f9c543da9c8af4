//! Option enumerations offered by the onboarding survey.
//!
//! Profiles store the option ids as plain strings; these types give the ids a
//! typed form for validation and a human label for display.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where the user starts from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    SomeExperience,
    Intermediate,
    Advanced,
}

/// Where the user wants to get to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalLevel {
    Basic,
    Hobby,
    Advanced,
    Professional,
}

/// How much time the user can spend per week.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeCommitment {
    Casual,
    Regular,
    Dedicated,
    Intense,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::SomeExperience,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    /// Stored option id
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::SomeExperience => "some_experience",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Complete Beginner",
            SkillLevel::SomeExperience => "Some Experience",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl GoalLevel {
    pub const ALL: [GoalLevel; 4] = [
        GoalLevel::Basic,
        GoalLevel::Hobby,
        GoalLevel::Advanced,
        GoalLevel::Professional,
    ];

    /// Stored option id
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalLevel::Basic => "basic",
            GoalLevel::Hobby => "hobby",
            GoalLevel::Advanced => "advanced",
            GoalLevel::Professional => "professional",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalLevel::Basic => "Basic Proficiency",
            GoalLevel::Hobby => "Hobby Level",
            GoalLevel::Advanced => "Advanced Skills",
            GoalLevel::Professional => "Professional Level",
        }
    }
}

impl TimeCommitment {
    pub const ALL: [TimeCommitment; 4] = [
        TimeCommitment::Casual,
        TimeCommitment::Regular,
        TimeCommitment::Dedicated,
        TimeCommitment::Intense,
    ];

    /// Stored option id
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeCommitment::Casual => "casual",
            TimeCommitment::Regular => "regular",
            TimeCommitment::Dedicated => "dedicated",
            TimeCommitment::Intense => "intense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeCommitment::Casual => "1-2 hours per week",
            TimeCommitment::Regular => "3-5 hours per week",
            TimeCommitment::Dedicated => "5-10 hours per week",
            TimeCommitment::Intense => "10+ hours per week",
        }
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == id)
            .ok_or_else(|| format!("Invalid skill level: {s}"))
    }
}

impl FromStr for GoalLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == id)
            .ok_or_else(|| format!("Invalid goal level: {s}"))
    }
}

impl FromStr for TimeCommitment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|commitment| commitment.as_str() == id)
            .ok_or_else(|| format!("Invalid time commitment: {s}"))
    }
}

/// Human label for any stored option id; unknown ids are returned verbatim.
///
/// # Examples
///
/// ```rust
/// use momentum_core::models::option_label;
///
/// assert_eq!(option_label("some_experience"), "Some Experience");
/// assert_eq!(option_label("professional"), "Professional Level");
/// assert_eq!(option_label("Jazz piano"), "Jazz piano");
/// ```
pub fn option_label(id: &str) -> &str {
    if let Ok(level) = id.parse::<SkillLevel>() {
        return level.label();
    }
    if let Ok(goal) = id.parse::<GoalLevel>() {
        return goal.label();
    }
    if let Ok(commitment) = id.parse::<TimeCommitment>() {
        return commitment.label();
    }
    id
}
