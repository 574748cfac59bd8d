use axum::{
    extract::{Path, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::{IntoResponse, Response as AxumResponse},
};
use ingrescan_core::domain::storage::services::ProcessedImageService;

use crate::application::http::server::{
    api_entities::api_error::{ApiError, ApiErrorResponse},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/processed/{filename}",
    tag = "processed",
    summary = "Download a processed image",
    params(
        ("filename" = String, Path, description = "Name returned in processed_image_url"),
    ),
    responses(
        (status = 200, description = "Image bytes with a content type inferred from the extension"),
        (status = 404, description = "No such image", body = ApiErrorResponse)
    )
)]
pub async fn get_processed_image(
    Path(filename): Path<String>,
    State(state): State<AppState>,
) -> Result<AxumResponse, ApiError> {
    let image = state.service.get_processed_image(filename).await?;

    Ok((
        [
            (CONTENT_TYPE, image.content_type),
            (CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        image.data,
    )
        .into_response())
}
