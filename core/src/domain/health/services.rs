use crate::domain::{
    common::services::Service,
    detection::ports::InferenceClient,
    health::{
        entities::{GatewayHealth, HealthStatus},
        ports::HealthCheckService,
    },
    storage::ports::ImageStore,
};

impl<IC, IS> HealthCheckService for Service<IC, IS>
where
    IC: InferenceClient,
    IS: ImageStore,
{
    async fn health(&self) -> GatewayHealth {
        let roboflow = &self.config.roboflow;

        let status = if roboflow.has_api_key() {
            HealthStatus::Ok
        } else {
            HealthStatus::MissingApiKey
        };

        GatewayHealth {
            status,
            api_base: roboflow.api_base.clone(),
            workspace: roboflow.workspace.clone(),
            workflow: roboflow.workflow.clone(),
        }
    }
}
