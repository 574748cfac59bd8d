mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};
use test_context::test_context;

#[test_context(GatewayContext)]
#[tokio::test]
async fn test_root_reports_liveness(ctx: &mut GatewayContext) {
    let server = ctx.server().await;

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Ingrescan detection gateway is running!" })
    );
}

#[test_context(GatewayContext)]
#[tokio::test]
async fn test_health_echoes_configuration(ctx: &mut GatewayContext) {
    let server = ctx.server().await;

    let response = server.get("/api/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "status": "ok",
            "api_base": ctx.upstream.base_url,
            "workspace": "masid3",
            "workflow": "detect-count-and-visualize"
        })
    );
    assert_eq!(ctx.upstream.hits(), 0);
}

#[test_context(GatewayContext)]
#[tokio::test]
async fn test_health_flags_missing_key_without_leaking_it(ctx: &mut GatewayContext) {
    let server = ctx.server_with(ctx.args(Some("  "))).await;

    let response = server.get("/api/health").await;
    let body = response.json::<Value>();

    assert_eq!(body["status"], "missing_api_key");
    assert!(body.get("api_key").is_none());
}

#[test_context(GatewayContext)]
#[tokio::test]
async fn test_routes_follow_root_path(ctx: &mut GatewayContext) {
    let mut args = ctx.args(Some(TEST_API_KEY));
    args.server.root_path = "/gateway".to_string();
    let server = ctx.server_with(args).await;

    assert_eq!(
        server.get("/gateway/api/health").await.status_code(),
        StatusCode::OK
    );
    assert_eq!(
        server.get("/api/health").await.status_code(),
        StatusCode::NOT_FOUND
    );

    let response = server
        .post("/gateway/api/detect")
        .add_header(
            axum::http::HeaderName::from_static("x-forwarded-host"),
            axum::http::HeaderValue::from_static(TEST_HOST),
        )
        .multipart(meal_form())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(
        response.json::<Value>()["processed_image_url"]
            .as_str()
            .unwrap()
            .starts_with("http://gateway.test/gateway/processed/")
    );
}

#[test_context(GatewayContext)]
#[tokio::test]
async fn test_trailing_slash_root_path_serves_its_own_links(ctx: &mut GatewayContext) {
    let mut args = ctx.args(Some(TEST_API_KEY));
    args.server.root_path = "/gateway/".to_string();
    let server = ctx.server_with(args).await;

    let response = server
        .post("/gateway/api/detect")
        .add_header(
            axum::http::HeaderName::from_static("x-forwarded-host"),
            axum::http::HeaderValue::from_static(TEST_HOST),
        )
        .multipart(meal_form())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let url = response.json::<Value>()["processed_image_url"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(url.starts_with("http://gateway.test/gateway/processed/processed_"));

    let path = url.trim_start_matches("http://gateway.test");
    let image = server.get(path).await;
    assert_eq!(image.status_code(), StatusCode::OK);
    assert_eq!(&image.as_bytes()[..], ANNOTATED_PNG);
}

#[test_context(GatewayContext)]
#[tokio::test]
async fn test_root_path_without_leading_slash(ctx: &mut GatewayContext) {
    let mut args = ctx.args(Some(TEST_API_KEY));
    args.server.root_path = "gateway".to_string();
    let server = ctx.server_with(args).await;

    assert_eq!(
        server.get("/gateway/api/health").await.status_code(),
        StatusCode::OK
    );

    let doc = server.get("/gateway/api-docs/openapi.json").await.json::<Value>();
    assert!(doc["paths"]["/gateway/api/detect"]["post"].is_object());
}

#[test_context(GatewayContext)]
#[tokio::test]
async fn test_metrics_endpoint_is_exposed(ctx: &mut GatewayContext) {
    let server = ctx.server().await;

    server.get("/api/health").await;
    let response = server.get("/metrics").await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

#[test_context(GatewayContext)]
#[tokio::test]
async fn test_openapi_document_lists_routes(ctx: &mut GatewayContext) {
    let server = ctx.server().await;

    let response = server.get("/api-docs/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let doc = response.json::<Value>();
    assert_eq!(doc["info"]["title"], "Ingrescan API");
    assert!(doc["paths"]["/api/detect"]["post"].is_object());
    assert!(doc["paths"]["/api/health"]["get"].is_object());
    assert!(doc["paths"]["/processed/{filename}"]["get"].is_object());
}
