use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::instrument;
use url::Url;

use crate::domain::{
    common::{RetryPolicy, RoboflowConfig, entities::app_errors::CoreError},
    detection::ports::InferenceClient,
    upload::entities::UploadedImage,
};

/// Upstream error bodies are cut to this many characters before being
/// surfaced to clients.
const MAX_ERROR_BODY_CHARS: usize = 2048;

/// Calls a hosted Roboflow workflow over REST with the image inlined as base64.
#[derive(Clone)]
pub struct RoboflowWorkflowClient {
    config: RoboflowConfig,
    retry: RetryPolicy,
    client: Client,
}

#[derive(Debug, Serialize)]
struct WorkflowRequest<'a> {
    api_key: &'a str,
    inputs: WorkflowInputs<'a>,
    use_cache: bool,
}

#[derive(Debug, Serialize)]
struct WorkflowInputs<'a> {
    image: ImageInput<'a>,
}

#[derive(Debug, Serialize)]
struct ImageInput<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

impl RoboflowWorkflowClient {
    pub fn new(config: RoboflowConfig, retry: RetryPolicy) -> Result<Self, CoreError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()
            .map_err(|e| {
                CoreError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            retry,
            client,
        })
    }

    /// `{api_base}/{workspace}/workflows/{workflow}`
    pub fn workflow_url(&self) -> Result<Url, CoreError> {
        let url = format!(
            "{}/{}/workflows/{}",
            self.config.api_base.trim_end_matches('/'),
            urlencoding::encode(&self.config.workspace),
            urlencoding::encode(&self.config.workflow)
        );

        Url::parse(&url).map_err(|e| {
            CoreError::ConfigurationError(format!(
                "Invalid detection service URL {}: {}",
                self.config.api_base, e
            ))
        })
    }
}

impl InferenceClient for RoboflowWorkflowClient {
    #[instrument(
        skip(self, image),
        fields(
            workspace = %self.config.workspace,
            workflow = %self.config.workflow,
            filename = %image.filename
        )
    )]
    async fn run_workflow(&self, image: &UploadedImage) -> Result<serde_json::Value, CoreError> {
        let api_key = self.config.usable_api_key().ok_or_else(|| {
            CoreError::ConfigurationError("set ROBOFLOW_API_KEY".to_string())
        })?;

        let url = self.workflow_url()?;
        let encoded = general_purpose::STANDARD.encode(&image.data);
        let request = WorkflowRequest {
            api_key,
            inputs: WorkflowInputs {
                image: ImageInput {
                    kind: "base64",
                    value: &encoded,
                },
            },
            use_cache: true,
        };

        let mut last_failure: Option<CoreError> = None;

        for attempt in 1..=self.retry.max_attempts {
            if attempt > 1 && !self.retry.delay.is_zero() {
                tokio::time::sleep(self.retry.delay).await;
            }

            tracing::info!(attempt, max_attempts = self.retry.max_attempts, "Running detection workflow");

            let response = match self.client.post(url.clone()).json(&request).send().await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Detection workflow request failed");
                    last_failure = Some(CoreError::UpstreamUnavailable(e.to_string()));
                    continue;
                }
            };

            let status = response.status();
            let body = match response.bytes().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Failed to read detection workflow response");
                    last_failure = Some(CoreError::UpstreamUnavailable(e.to_string()));
                    continue;
                }
            };

            if status != StatusCode::OK {
                let body = truncate(String::from_utf8_lossy(&body).into_owned());
                tracing::warn!(attempt, status = %status, body = %body, "Detection workflow returned an error");
                last_failure = Some(CoreError::UpstreamError {
                    status: status.as_u16(),
                    body,
                });
                continue;
            }

            return serde_json::from_slice(&body).map_err(|e| {
                tracing::error!(error = %e, "Detection workflow response is not JSON");
                CoreError::MalformedUpstreamResponse(format!("response is not JSON: {}", e))
            });
        }

        let failure = last_failure.unwrap_or_else(|| {
            CoreError::UpstreamUnavailable("no attempt was made".to_string())
        });
        tracing::error!(
            attempts = self.retry.max_attempts,
            error = %failure,
            "Detection workflow failed after all attempts"
        );

        Err(failure)
    }
}

fn truncate(mut body: String) -> String {
    if let Some((index, _)) = body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        body.truncate(index);
        body.push('…');
    }
    body
}
