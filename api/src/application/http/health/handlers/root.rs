use serde::Serialize;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::response::Response;

#[derive(Debug, Serialize, ToSchema)]
pub struct LivenessResponse {
    #[schema(example = "Ingrescan detection gateway is running!")]
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, body = LivenessResponse)
    )
)]
pub async fn root() -> Response<LivenessResponse> {
    Response::OK(LivenessResponse {
        message: "Ingrescan detection gateway is running!".to_string(),
    })
}
