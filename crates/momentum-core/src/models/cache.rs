//! Wire shape of the persisted plan cache record.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Profile;

/// Current layout of [`CachedPlanRecord`].
pub const CACHE_RECORD_VERSION: u32 = 1;

/// Cached plan text stored under the `learningPlan` key, together with the
/// profile it was generated for.
///
/// ```json
/// { "content": [{ "text": "{\"weeks\":[...]}" }],
///   "userData": { "hobbyName": "...", ... },
///   "timestamp": "2025-03-01T12:00:00Z",
///   "version": 1 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CachedPlanRecord {
    pub content: Vec<ContentBlock>,

    /// Profile fingerprint. Older records were written without one and never
    /// match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<Profile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,

    #[serde(default = "legacy_version")]
    pub version: u32,
}

/// A text block of the record's content list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentBlock {
    pub text: String,
}

fn legacy_version() -> u32 {
    0
}

impl CachedPlanRecord {
    /// Builds a record for plan text fetched for `profile` at `fetched_at`.
    pub fn new(text: impl Into<String>, profile: Profile, fetched_at: Timestamp) -> Self {
        Self {
            content: vec![ContentBlock { text: text.into() }],
            user_data: Some(profile),
            timestamp: Some(fetched_at),
            version: CACHE_RECORD_VERSION,
        }
    }

    /// Plan text of the first content block.
    pub fn plan_text(&self) -> Option<&str> {
        self.content.first().map(|block| block.text.as_str())
    }

    /// Whether the record was generated for exactly this profile.
    pub fn matches(&self, profile: &Profile) -> bool {
        self.user_data.as_ref() == Some(profile)
    }

    pub fn fetched_at(&self) -> Option<Timestamp> {
        self.timestamp
    }
}
