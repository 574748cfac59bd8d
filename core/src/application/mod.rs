use crate::{
    domain::common::{GatewayConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{roboflow::RoboflowWorkflowClient, storage::LocalImageStore},
};

pub type GatewayService = Service<RoboflowWorkflowClient, LocalImageStore>;

pub async fn create_service(config: GatewayConfig) -> Result<GatewayService, CoreError> {
    let inference_client = RoboflowWorkflowClient::new(config.roboflow.clone(), config.retry)?;
    let image_store = LocalImageStore::new(config.storage.processed_folder.clone()).await?;

    if !config.roboflow.has_api_key() {
        tracing::warn!("ROBOFLOW_API_KEY is not set, detection requests will be rejected");
    }

    tracing::info!(
        api_base = %config.roboflow.api_base,
        workspace = %config.roboflow.workspace,
        workflow = %config.roboflow.workflow,
        max_attempts = config.retry.max_attempts,
        "Detection gateway service created"
    );

    Ok(Service::new(config, inference_client, image_store))
}
