//! Last viewed resource model.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of learning resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Article,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Video => "video",
            ResourceKind::Article => "article",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "video" => Ok(ResourceKind::Video),
            "article" => Ok(ResourceKind::Article),
            _ => Err(format!("Invalid resource type: {s}")),
        }
    }
}

/// The single "continue learning" slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LastViewedResource {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    pub url: String,
    /// 0-based week of the plan the resource belongs to
    pub week_index: usize,
}
