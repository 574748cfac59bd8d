use std::{path::PathBuf, time::Duration};

use clap::Parser;
use ingrescan_core::domain::common::{
    GatewayConfig, RetryPolicy, RoboflowConfig, StorageConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "ingrescan", version, about = "Ingredient detection gateway")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub roboflow: RoboflowArgs,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/gateway`
    #[arg(long = "root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Comma separated list; any origin is allowed when empty
    #[arg(long = "allowed-origins", env = "ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
}

impl ServerArgs {
    /// `root_path` as a route prefix: one leading `/`, no trailing `/`, and
    /// empty for the site root.
    pub fn route_prefix(&self) -> String {
        normalize_root_path(&self.root_path)
    }
}

pub fn normalize_root_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');

    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct RoboflowArgs {
    #[arg(long = "roboflow-api-key", env = "ROBOFLOW_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(
        long = "roboflow-api-base",
        env = "ROBOFLOW_API_BASE",
        default_value = "https://serverless.roboflow.com"
    )]
    pub api_base: String,

    #[arg(long = "roboflow-workspace", env = "ROBOFLOW_WORKSPACE", default_value = "masid3")]
    pub workspace: String,

    #[arg(
        long = "roboflow-workflow",
        env = "ROBOFLOW_WORKFLOW",
        default_value = "detect-count-and-visualize"
    )]
    pub workflow: String,

    #[arg(long = "roboflow-max-attempts", env = "ROBOFLOW_MAX_ATTEMPTS", default_value_t = 3)]
    pub max_attempts: u32,

    #[arg(long = "roboflow-retry-delay-ms", env = "ROBOFLOW_RETRY_DELAY_MS", default_value_t = 0)]
    pub retry_delay_ms: u64,

    #[arg(
        long = "roboflow-connect-timeout-secs",
        env = "ROBOFLOW_CONNECT_TIMEOUT_SECS",
        default_value_t = 10
    )]
    pub connect_timeout_secs: u64,

    #[arg(
        long = "roboflow-read-timeout-secs",
        env = "ROBOFLOW_READ_TIMEOUT_SECS",
        default_value_t = 60
    )]
    pub read_timeout_secs: u64,
}

#[derive(Debug, Clone, clap::Args)]
pub struct StorageArgs {
    #[arg(long = "processed-folder", env = "PROCESSED_FOLDER", default_value = "/tmp/processed")]
    pub processed_folder: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for GatewayConfig {
    fn from(args: Args) -> Self {
        Self {
            roboflow: RoboflowConfig {
                api_key: args.roboflow.api_key,
                api_base: args.roboflow.api_base,
                workspace: args.roboflow.workspace,
                workflow: args.roboflow.workflow,
                connect_timeout: Duration::from_secs(args.roboflow.connect_timeout_secs),
                read_timeout: Duration::from_secs(args.roboflow.read_timeout_secs),
            },
            storage: StorageConfig {
                processed_folder: args.storage.processed_folder,
            },
            retry: RetryPolicy::new(
                args.roboflow.max_attempts,
                Duration::from_millis(args.roboflow.retry_delay_ms),
            ),
        }
    }
}
