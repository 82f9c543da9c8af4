//! Learning plan payload returned by the generator.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{MomentumError, Result};

/// The structured weekly curriculum.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanPayload {
    /// One entry per week, in order
    #[serde(default)]
    pub weeks: Vec<WeekPlan>,
}

/// Resources for a single week of the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    /// Week label as given by the generator ("Week 1: Basics", "1", ...)
    #[serde(deserialize_with = "string_or_number")]
    pub week: String,

    #[serde(default)]
    pub youtube_videos: Vec<ResourceItem>,

    #[serde(default)]
    pub learning_articles: Vec<ResourceItem>,
}

/// A single video or article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceItem {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl PlanPayload {
    /// Parses plan JSON, rejecting documents without at least one week.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use momentum_core::models::PlanPayload;
    ///
    /// let plan = PlanPayload::parse(r#"{"weeks":[{"week":"Week 1"}]}"#).unwrap();
    /// assert_eq!(plan.week_count(), 1);
    ///
    /// assert!(PlanPayload::parse(r#"{"weeks":[]}"#).is_err());
    /// assert!(PlanPayload::parse("not json").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let plan: PlanPayload = serde_json::from_str(text.trim()).map_err(|e| {
            MomentumError::invalid_plan(format!("not a learning plan document: {e}"))
        })?;

        if !plan.is_usable() {
            return Err(MomentumError::invalid_plan("plan has no weeks"));
        }
        Ok(plan)
    }

    /// A plan is usable only when it has at least one week.
    pub fn is_usable(&self) -> bool {
        !self.weeks.is_empty()
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }
}

impl WeekPlan {
    /// Total number of resources in the week.
    pub fn resource_count(&self) -> usize {
        self.youtube_videos.len() + self.learning_articles.len()
    }
}

/// Generators have been seen emitting `"week": 1` as well as `"week": "1"`.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Label::deserialize(deserializer)? {
        Label::Text(text) => text,
        Label::Number(number) => number.to_string(),
    })
}
