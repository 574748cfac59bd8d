use utoipa::OpenApi;

use crate::application::http::{
    detection::router::DetectionApiDoc, health::router::HealthApiDoc,
    processed::router::ProcessedApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ingrescan API",
        description = "Ingredient detection gateway in front of a hosted Roboflow workflow"
    ),
    nest(
        (path = "/api", api = DetectionApiDoc),
    )
)]
pub struct ApiDoc;

/// Full document, with routes that live outside `/api` merged in.
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(HealthApiDoc::openapi());
    doc.merge(ProcessedApiDoc::openapi());
    doc
}
