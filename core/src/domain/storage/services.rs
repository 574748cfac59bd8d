use std::future::Future;

use tracing::instrument;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    detection::ports::InferenceClient,
    storage::{
        entities::{PersistedImage, ProcessedImage},
        helpers::{is_safe_filename, select_image_bytes},
        ports::ImageStore,
    },
    upload::{entities::UploadedImage, value_objects::ImageFormat},
};

/// Service trait for processed image storage
pub trait ProcessedImageService: Send + Sync {
    /// Persist the annotated image, or the original upload when the annotated
    /// one is missing or cannot be decoded
    fn persist_processed_image(
        &self,
        annotated_image: Option<String>,
        upload: &UploadedImage,
    ) -> impl Future<Output = Result<PersistedImage, CoreError>> + Send;

    /// Load a previously persisted image
    fn get_processed_image(
        &self,
        filename: String,
    ) -> impl Future<Output = Result<ProcessedImage, CoreError>> + Send;
}

impl<IC, IS> ProcessedImageService for Service<IC, IS>
where
    IC: InferenceClient,
    IS: ImageStore,
{
    #[instrument(skip(self, annotated_image, upload), fields(upload = %upload.filename))]
    async fn persist_processed_image(
        &self,
        annotated_image: Option<String>,
        upload: &UploadedImage,
    ) -> Result<PersistedImage, CoreError> {
        let filename = self.file_namer.next_name(&upload.filename);
        let (data, source) = select_image_bytes(annotated_image.as_deref(), &upload.data);
        let size_bytes = data.len();

        self.image_store.write(&filename, data).await?;

        tracing::info!(
            filename = %filename,
            source = ?source,
            size = size_bytes,
            "Processed image stored"
        );

        Ok(PersistedImage {
            filename,
            source,
            size_bytes,
        })
    }

    async fn get_processed_image(&self, filename: String) -> Result<ProcessedImage, CoreError> {
        if !is_safe_filename(&filename) {
            tracing::warn!(filename = %filename, "Rejected unsafe processed image name");
            return Err(CoreError::NotFound);
        }

        let data = self
            .image_store
            .read(&filename)
            .await?
            .ok_or(CoreError::NotFound)?;

        let content_type = ImageFormat::from_filename(&filename)
            .map(|format| format.content_type())
            .unwrap_or("application/octet-stream");

        Ok(ProcessedImage {
            filename,
            content_type,
            data,
        })
    }
}
