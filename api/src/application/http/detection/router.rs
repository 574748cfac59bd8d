use axum::{Router, extract::DefaultBodyLimit, routing::post};
use ingrescan_core::domain::upload::MAX_IMAGE_SIZE;
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::detect_ingredients::{__path_detect_ingredients, detect_ingredients};

/// Headroom for multipart framing so oversized images reach the validator.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(detect_ingredients))]
pub struct DetectionApiDoc;

pub fn detection_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/detect", state.args.server.route_prefix()),
            post(detect_ingredients),
        )
        .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + MULTIPART_OVERHEAD))
}
