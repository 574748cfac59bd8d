use std::{path::PathBuf, time::Duration};

use rand::{Rng, distributions::Alphanumeric};

pub mod entities;
pub mod services;

/// Value shipped in sample environments; treated the same as an unset key.
pub const PLACEHOLDER_API_KEY: &str = "REPLACE_ME";

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub roboflow: RoboflowConfig,
    pub storage: StorageConfig,
    pub retry: RetryPolicy,
}

#[derive(Clone, Debug)]
pub struct RoboflowConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub workspace: String,
    pub workflow: String,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl RoboflowConfig {
    /// Returns the API key when it is set to something usable.
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn has_api_key(&self) -> bool {
        self.usable_api_key().is_some()
    }
}

impl Default for RoboflowConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://serverless.roboflow.com".to_string(),
            workspace: "masid3".to_string(),
            workflow: "detect-count-and-visualize".to_string(),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub processed_folder: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            processed_folder: PathBuf::from("/tmp/processed"),
        }
    }
}

/// How many times the upstream workflow is attempted and how long to wait
/// between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::ZERO)
    }
}

pub fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
