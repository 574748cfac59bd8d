use std::sync::Arc;

use crate::domain::{
    common::GatewayConfig, detection::ports::InferenceClient, storage::helpers::ProcessedFileNamer,
    storage::ports::ImageStore,
};

/// Application service; every domain service trait is implemented on it.
pub struct Service<IC, IS>
where
    IC: InferenceClient,
    IS: ImageStore,
{
    pub(crate) config: Arc<GatewayConfig>,
    pub(crate) inference_client: Arc<IC>,
    pub(crate) image_store: Arc<IS>,
    pub(crate) file_namer: Arc<ProcessedFileNamer>,
}

impl<IC, IS> Service<IC, IS>
where
    IC: InferenceClient,
    IS: ImageStore,
{
    pub fn new(config: GatewayConfig, inference_client: IC, image_store: IS) -> Self {
        Self {
            config: Arc::new(config),
            inference_client: Arc::new(inference_client),
            image_store: Arc::new(image_store),
            file_namer: Arc::new(ProcessedFileNamer::new()),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

impl<IC, IS> Clone for Service<IC, IS>
where
    IC: InferenceClient,
    IS: ImageStore,
{
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            inference_client: Arc::clone(&self.inference_client),
            image_store: Arc::clone(&self.image_store),
            file_namer: Arc::clone(&self.file_namer),
        }
    }
}
