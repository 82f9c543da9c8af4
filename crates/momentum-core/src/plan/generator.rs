//! HTTP client for the remote learning plan generator.

use std::future::Future;

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::Serialize;

use crate::{
    config::GeneratorConfig,
    error::{GeneratorResultExt, MomentumError, Result, ResultExt},
    models::Profile,
};

/// Source of freshly generated learning plans.
pub trait PlanGenerator {
    /// Requests a plan for `profile` and returns the raw response body.
    ///
    /// The body is not interpreted here; see
    /// [`normalize_response`](super::extract::normalize_response).
    fn generate(&self, profile: &Profile) -> impl Future<Output = Result<String>> + Send;
}

/// Body of POST <endpoint>
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    hobby_name: &'a str,
    current_skill_level: &'a str,
    desired_skill_level: &'a str,
    time_commitment: &'a str,
}

impl<'a> From<&'a Profile> for GenerateRequest<'a> {
    fn from(profile: &'a Profile) -> Self {
        Self {
            hobby_name: &profile.hobby_name,
            current_skill_level: &profile.current_skill_level,
            desired_skill_level: &profile.desired_skill_level,
            time_commitment: &profile.time_commitment,
        }
    }
}

/// Plan generator reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPlanGenerator {
    config: GeneratorConfig,
    http_client: reqwest::Client,
}

impl HttpPlanGenerator {
    /// Create a new generator client from configuration
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain"));

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .with_context("failed to create HTTP client")?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

impl PlanGenerator for HttpPlanGenerator {
    async fn generate(&self, profile: &Profile) -> Result<String> {
        debug!(
            "Requesting learning plan for '{}' from {}",
            profile.hobby_name, self.config.endpoint
        );

        let response = self
            .http_client
            .post(self.config.endpoint.trim())
            .json(&GenerateRequest::from(profile))
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .generator_context("failed to read response body")?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(MomentumError::Generator {
                message: format!("API error ({status}): {}", truncate(&body, 200)),
            })
        }
    }
}

impl HttpPlanGenerator {
    fn send_error(&self, err: reqwest::Error) -> MomentumError {
        if err.is_timeout() {
            MomentumError::GeneratorTimeout {
                seconds: self.config.timeout_secs,
            }
        } else {
            MomentumError::Generator {
                message: format!("HTTP request failed: {err}"),
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
