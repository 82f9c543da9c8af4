//! Pulling plan JSON out of generator responses.
//!
//! The generator has answered in several shapes over time: a bare
//! `{"weeks": [...]}` object, a `{"content": [{"text": "..."}]}` wrapper, and
//! free text where the JSON sits in a fenced block or ahead of an
//! `Explanation:` section. [`normalize_response`] unwraps the envelope and
//! hands any text to an [`Extractor`], an ordered list of
//! [`ExtractionStrategy`] values where the first success wins.

use log::debug;
use serde_json::Value;

use crate::{
    error::{MomentumError, Result},
    models::PlanPayload,
};

/// One way of locating plan JSON inside response text.
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Candidate JSON text, or `None` when this strategy does not apply.
    fn extract(&self, text: &str) -> Option<String>;
}

/// Inner text of the first code block fenced as ```` ```json ````.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedJsonBlock;

/// Text ahead of an `Explanation:` marker, minus a leading
/// `Processing JSON:` label.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationPrefix;

const FENCE: &str = "```";
const EXPLANATION_MARKER: &str = "Explanation:";
const PROCESSING_LABEL: &str = "Processing JSON:";

impl ExtractionStrategy for FencedJsonBlock {
    fn name(&self) -> &'static str {
        "fenced-json-block"
    }

    fn extract(&self, text: &str) -> Option<String> {
        let mut rest = text;
        while let Some(start) = rest.find(FENCE) {
            let after_fence = &rest[start + FENCE.len()..];
            let (label, body) = after_fence.split_once('\n')?;
            if label.trim().eq_ignore_ascii_case("json") {
                let end = body.find(FENCE)?;
                let inner = body[..end].trim();
                return (!inner.is_empty()).then(|| inner.to_string());
            }
            // Skip this block entirely and keep looking
            let end = body.find(FENCE)?;
            rest = &body[end + FENCE.len()..];
        }
        None
    }
}

impl ExtractionStrategy for ExplanationPrefix {
    fn name(&self) -> &'static str {
        "explanation-prefix"
    }

    fn extract(&self, text: &str) -> Option<String> {
        let head = text
            .split_once(EXPLANATION_MARKER)
            .map_or(text, |(head, _)| head)
            .trim();
        let head = head.strip_prefix(PROCESSING_LABEL).unwrap_or(head).trim();
        (!head.is_empty()).then(|| head.to_string())
    }
}

/// Ordered list of extraction strategies.
pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Extractor {
    /// Extractor with no strategies; see [`Extractor::with_strategy`].
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Appends a strategy, tried after all existing ones.
    pub fn with_strategy(mut self, strategy: impl ExtractionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Names of the configured strategies, in order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Runs the strategies in order; the first candidate wins.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.strategies.iter().find_map(|strategy| {
            let candidate = strategy.extract(text)?;
            debug!("Extracted plan text with strategy '{}'", strategy.name());
            Some(candidate)
        })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::empty()
            .with_strategy(FencedJsonBlock)
            .with_strategy(ExplanationPrefix)
    }
}

/// Plan text as it will be cached, plus the parsed payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPlan {
    pub text: String,
    pub plan: PlanPayload,
}

/// Turns a raw generator response body into a validated plan.
///
/// # Errors
///
/// Returns `MomentumError::InvalidPlan` when no plan JSON can be located or
/// the located JSON has no weeks.
pub fn normalize_response(body: &str, extractor: &Extractor) -> Result<ExtractedPlan> {
    let text = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) if object.contains_key("weeks") => body.trim().to_string(),
        Ok(Value::Object(object)) => {
            let wrapped = object
                .get("content")
                .and_then(|content| content.get(0))
                .and_then(|block| block.get("text"))
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    MomentumError::invalid_plan("response has neither weeks nor content text")
                })?;
            extract_text(wrapped, extractor)?
        }
        Ok(Value::String(inner)) => extract_text(&inner, extractor)?,
        Ok(_) => return Err(MomentumError::invalid_plan("unrecognized response shape")),
        Err(_) => extract_text(body, extractor)?,
    };

    let plan = PlanPayload::parse(&text)?;
    Ok(ExtractedPlan { text, plan })
}

fn extract_text(text: &str, extractor: &Extractor) -> Result<String> {
    extractor
        .extract(text)
        .ok_or_else(|| MomentumError::invalid_plan("no plan JSON found in response text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"{"weeks":[{"week":"Week 1","youtubeVideos":[{"title":"Intro","url":"https://youtu.be/x"}],"learningArticles":[]}]}"#;

    #[test]
    fn test_fenced_block_and_plain_prefix_yield_same_plan() {
        let fenced = format!("```json\n{PLAN}\n``` \n\nExplanation:\n\nThis plan starts slow.");
        let plain = format!("{PLAN}\n\nExplanation:\n\nThis plan starts slow.");
        let extractor = Extractor::default();

        let from_fenced = normalize_response(&fenced, &extractor).unwrap();
        let from_plain = normalize_response(&plain, &extractor).unwrap();

        assert_eq!(from_fenced.plan, from_plain.plan);
        assert_eq!(from_fenced.text, PLAN);
        assert_eq!(from_plain.text, PLAN);
    }

    #[test]
    fn test_processing_label_is_stripped() {
        let text = format!("Processing JSON:\n{PLAN}\n\nExplanation:\n\nDone.");
        assert_eq!(ExplanationPrefix.extract(&text).as_deref(), Some(PLAN));
    }

    #[test]
    fn test_fenced_block_skips_unlabeled_blocks() {
        let text = format!("```\nnot it\n```\nthen\n```JSON\n{PLAN}\n```");
        assert_eq!(FencedJsonBlock.extract(&text).as_deref(), Some(PLAN));
        assert_eq!(FencedJsonBlock.extract("```json\n{\"weeks\":[]}"), None);
        assert_eq!(FencedJsonBlock.extract(PLAN), None);
    }

    #[test]
    fn test_direct_weeks_object() {
        let extracted = normalize_response(PLAN, &Extractor::default()).unwrap();
        assert_eq!(extracted.plan.week_count(), 1);
        assert_eq!(extracted.text, PLAN);
    }

    #[test]
    fn test_content_wrapper() {
        let body = serde_json::json!({
            "content": [{ "text": format!("{PLAN}\n\nExplanation:\n\nWhy.") }]
        })
        .to_string();

        let extracted = normalize_response(&body, &Extractor::default()).unwrap();
        assert_eq!(extracted.plan.weeks[0].week, "Week 1");
    }

    #[test]
    fn test_invalid_structures_are_rejected() {
        let extractor = Extractor::default();
        for body in [
            r#"{"weeks":[]}"#,
            r#"{"content":[]}"#,
            r#"[1,2,3]"#,
            "Sorry, I cannot help with that.\n\nExplanation:\n\nNo plan.",
            "",
        ] {
            let err = normalize_response(body, &extractor).unwrap_err();
            assert!(
                matches!(err, MomentumError::InvalidPlan { .. }),
                "{body:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_custom_strategies_run_in_order() {
        struct Marker;
        impl ExtractionStrategy for Marker {
            fn name(&self) -> &'static str {
                "marker"
            }
            fn extract(&self, text: &str) -> Option<String> {
                text.split_once("PLAN>").map(|(_, rest)| rest.trim().to_string())
            }
        }

        let extractor = Extractor::empty().with_strategy(Marker).with_strategy(ExplanationPrefix);
        assert_eq!(extractor.strategy_names(), vec!["marker", "explanation-prefix"]);

        let text = format!("Here you go PLAN> {PLAN}");
        let extracted = normalize_response(&text, &extractor).unwrap();
        assert_eq!(extracted.text, PLAN);
    }
}
