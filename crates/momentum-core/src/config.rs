//! Remote plan generator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{MomentumError, Result};

/// Endpoint of the hosted plan generator.
pub const DEFAULT_ENDPOINT: &str =
    "https://momentum-backend-server.onrender.com/generate-personalized-learning";

/// Upper bound on a single generator round trip.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const MAX_TIMEOUT_SECS: u64 = 300;

/// Where and how long to wait for learning plans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// URL the profile is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GeneratorConfig {
    /// Configuration for a custom endpoint with the default timeout.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks the endpoint scheme and timeout bounds.
    ///
    /// # Errors
    ///
    /// Returns `MomentumError::Configuration` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(MomentumError::Configuration {
                message: "generator endpoint is required".to_string(),
            });
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(MomentumError::Configuration {
                message: format!("generator endpoint must be an http(s) URL: {endpoint}"),
            });
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(MomentumError::Configuration {
                message: format!(
                    "timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}, got {}",
                    self.timeout_secs
                ),
            });
        }
        Ok(())
    }
}
