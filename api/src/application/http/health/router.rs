use axum::{Router, routing::get};
use utoipa::OpenApi;

use crate::application::http::server::app_state::AppState;

use super::handlers::{
    health_check::{__path_health_check, health_check},
    root::{__path_root, root},
};

#[derive(OpenApi)]
#[openapi(paths(root, health_check))]
pub struct HealthApiDoc;

pub fn health_routes(state: AppState) -> Router<AppState> {
    let root_path = state.args.server.route_prefix();

    Router::new()
        .route(&format!("{}/", root_path), get(root))
        .route(&format!("{}/api/health", root_path), get(health_check))
}
