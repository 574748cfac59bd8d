use axum::extract::State;
use ingrescan_core::domain::health::{GatewayHealth, HealthCheckService};

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    summary = "Gateway configuration status",
    description = "Reports whether an API key is configured and which workflow requests are sent to.",
    responses(
        (status = 200, body = GatewayHealth)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response<GatewayHealth> {
    Response::OK(state.service.health().await)
}
