use axum::extract::{Multipart, Query, State, multipart::MultipartRejection};
use ingrescan_core::domain::{
    detection::{DetectIngredientsInput, DetectionResult, DetectionService},
    upload::{RawUpload, validate_upload},
};
use tracing::warn;

use crate::application::http::{
    detection::validators::{DetectIngredientsForm, DetectIngredientsParams},
    forwarded::ForwardedOrigin,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

const IMAGE_FIELD: &str = "image";

#[utoipa::path(
    post,
    path = "/detect",
    tag = "detection",
    summary = "Detect ingredients in a food photo",
    description = "Runs the detection workflow on the uploaded image, counts detections per class and stores the annotated image under /processed.",
    request_body(content = DetectIngredientsForm, content_type = "multipart/form-data"),
    params(DetectIngredientsParams),
    responses(
        (status = 200, body = DetectionResult),
        (status = 400, description = "Missing, empty or unsupported upload", body = ApiErrorResponse),
        (status = 413, description = "Image too large", body = ApiErrorResponse),
        (status = 500, description = "Server misconfigured or storage failure", body = ApiErrorResponse),
        (status = 502, description = "Detection service failure", body = ApiErrorResponse)
    )
)]
pub async fn detect_ingredients(
    State(state): State<AppState>,
    Query(params): Query<DetectIngredientsParams>,
    ForwardedOrigin(origin): ForwardedOrigin,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<DetectionResult>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        warn!(error = %e, "Request is not a multipart upload");
        ApiError::BadRequest("No image file provided".to_string())
    })?;

    let mut upload: Option<RawUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(ApiError::multipart)? {
        if field.name() != Some(IMAGE_FIELD) || upload.is_some() {
            continue;
        }

        // A part without a filename is a form value, not a file.
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await.map_err(ApiError::multipart)?;

        upload = Some(RawUpload {
            file_name: Some(file_name),
            data,
        });
    }

    let image = validate_upload(upload)?;

    let result = state
        .service
        .detect_ingredients(DetectIngredientsInput {
            image,
            origin,
            include_base64: params.include_base64(),
        })
        .await?;

    Ok(Response::OK(result))
}
