#![allow(dead_code)]

mod fixtures;
mod upstream;

pub use fixtures::*;
pub use upstream::*;

use axum_test::TestServer;
use ingrescan_api::{
    application::http::server::http_server::{router, state},
    args::{Args, LogArgs, RoboflowArgs, ServerArgs, StorageArgs},
};
use std::{path::PathBuf, sync::Arc};
use tempfile::TempDir;
use test_context::AsyncTestContext;

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_HOST: &str = "gateway.test";

/// A gateway wired to a local mock of the workflow service, with its own
/// processed image folder.
pub struct GatewayContext {
    pub upstream: MockUpstream,
    pub storage: TempDir,
}

impl AsyncTestContext for GatewayContext {
    async fn setup() -> Self {
        let upstream = MockUpstream::start(vec![UpstreamReply::ok(fruit_bowl_response())]).await;
        let storage = TempDir::new().expect("Failed to create temp directory");

        Self { upstream, storage }
    }
}

impl GatewayContext {
    pub fn processed_folder(&self) -> PathBuf {
        self.storage.path().join("processed")
    }

    pub fn args(&self, api_key: Option<&str>) -> Args {
        Args {
            server: ServerArgs {
                host: "127.0.0.1".to_string(),
                port: 0,
                root_path: String::new(),
                allowed_origins: vec![],
            },
            roboflow: RoboflowArgs {
                api_key: api_key.map(str::to_string),
                api_base: self.upstream.base_url.clone(),
                workspace: "masid3".to_string(),
                workflow: "detect-count-and-visualize".to_string(),
                max_attempts: 3,
                retry_delay_ms: 0,
                connect_timeout_secs: 2,
                read_timeout_secs: 5,
            },
            storage: StorageArgs {
                processed_folder: self.processed_folder(),
            },
            log: LogArgs {
                filter: "info".to_string(),
                json: false,
            },
        }
    }

    pub async fn server(&self) -> TestServer {
        self.server_with(self.args(Some(TEST_API_KEY))).await
    }

    pub async fn server_with(&self, args: Args) -> TestServer {
        let state = state(Arc::new(args)).await.expect("Failed to build state");
        let router = router(state).expect("Failed to build router");
        TestServer::new(router).expect("Failed to start test server")
    }

    /// Names of the files written to the processed folder.
    pub fn processed_files(&self) -> Vec<String> {
        match std::fs::read_dir(self.processed_folder()) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => vec![],
        }
    }
}
