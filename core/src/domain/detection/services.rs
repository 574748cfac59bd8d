use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    detection::{
        aggregator::summarize,
        entities::DetectionResult,
        normalizer::normalize_workflow_response,
        ports::{DetectionService, InferenceClient},
        value_objects::DetectIngredientsInput,
    },
    storage::{ports::ImageStore, services::ProcessedImageService},
};

impl<IC, IS> DetectionService for Service<IC, IS>
where
    IC: InferenceClient,
    IS: ImageStore,
{
    #[instrument(
        skip(self, input),
        fields(filename = %input.image.filename, size = input.image.size())
    )]
    async fn detect_ingredients(
        &self,
        input: DetectIngredientsInput,
    ) -> Result<DetectionResult, CoreError> {
        // 1. Run the remote workflow
        let raw_response = self.inference_client.run_workflow(&input.image).await?;

        // 2. Resolve the upstream shape
        let normalized = normalize_workflow_response(&raw_response).inspect_err(|e| {
            tracing::error!(error = %e, "Detection workflow returned an unexpected shape");
        })?;

        // 3. Count classes
        let summary = summarize(&normalized.predictions);

        // 4. Persist annotated image (or the original)
        let persisted = self
            .persist_processed_image(normalized.annotated_image.clone(), &input.image)
            .await?;

        // 5. Build the public URL
        let processed_image_url = input.origin.processed_image_url(&persisted.filename);

        tracing::info!(
            total = summary.ingredients,
            classes = ?summary.detected_ingredients,
            source = ?persisted.source,
            "Detection completed"
        );

        let processed_image_base64 = if input.include_base64 {
            normalized.annotated_image
        } else {
            None
        };

        Ok(DetectionResult::new(
            processed_image_url,
            summary,
            processed_image_base64,
        ))
    }
}
