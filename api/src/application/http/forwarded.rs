use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        HeaderMap, Uri,
        header::HOST,
        request::Parts,
    },
};
use ingrescan_core::domain::detection::RequestOrigin;

use crate::application::http::server::app_state::AppState;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Public origin of the request as seen by the client, honouring
/// `X-Forwarded-Proto` / `X-Forwarded-Host` from a reverse proxy.
///
/// Usage:
/// ```rust,ignore
/// async fn handler(ForwardedOrigin(origin): ForwardedOrigin) {
///     let url = origin.processed_image_url("processed_x.png");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ForwardedOrigin(pub RequestOrigin);

impl FromRequestParts<AppState> for ForwardedOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(ForwardedOrigin(resolve_origin(
            &parts.headers,
            &parts.uri,
            &state.args.server.route_prefix(),
        )))
    }
}

pub fn resolve_origin(headers: &HeaderMap, uri: &Uri, root_path: &str) -> RequestOrigin {
    let scheme = first_value(headers, X_FORWARDED_PROTO)
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string());

    let host = first_value(headers, X_FORWARDED_HOST)
        .or_else(|| first_value(headers, HOST.as_str()))
        .or_else(|| uri.authority().map(|authority| authority.to_string()))
        .unwrap_or_else(|| "localhost".to_string());

    RequestOrigin::new(&scheme, &host, root_path)
}

/// First entry of a possibly comma separated header, trimmed.
fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
