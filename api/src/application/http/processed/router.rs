use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::get_processed_image::{__path_get_processed_image, get_processed_image};

#[derive(OpenApi)]
#[openapi(paths(get_processed_image))]
pub struct ProcessedApiDoc;

pub fn processed_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/processed/{{filename}}", state.args.server.route_prefix()),
        get(get_processed_image),
    )
}
