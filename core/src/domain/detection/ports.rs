use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    detection::{entities::DetectionResult, value_objects::DetectIngredientsInput},
    upload::entities::UploadedImage,
};

/// Client for the remote detection workflow
#[cfg_attr(test, mockall::automock)]
pub trait InferenceClient: Send + Sync {
    /// Run the workflow on `image` and return the raw JSON body of the first
    /// successful response
    fn run_workflow(
        &self,
        image: &UploadedImage,
    ) -> impl Future<Output = Result<serde_json::Value, CoreError>> + Send;
}

/// Service trait for ingredient detection
pub trait DetectionService: Send + Sync {
    fn detect_ingredients(
        &self,
        input: DetectIngredientsInput,
    ) -> impl Future<Output = Result<DetectionResult, CoreError>> + Send;
}
