use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
    MissingApiKey,
}

/// Configuration echo returned by the health endpoint. Never carries secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GatewayHealth {
    pub status: HealthStatus,
    #[schema(example = "https://serverless.roboflow.com")]
    pub api_base: String,
    pub workspace: String,
    pub workflow: String,
}
