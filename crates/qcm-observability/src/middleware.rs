use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// Response header echoing the id every log line of the request carries.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Route template the request matched (`/api/users/{id}`), or the raw path
/// when no route matched. Layers added with `Router::layer` run after routing
/// and see the template.
pub fn request_route(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |m| m.as_str().to_owned())
}

/// Runs the request inside an `http_request` span tagged with a fresh
/// `request_id`, then logs the outcome at a level matching the status class.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let route = request_route(&req);

    let span = info_span!(
        "http_request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
    );

    let mut response = async move {
        debug!("Request received");

        let response = next.run(req).await;
        let status = response.status();
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        if status.is_server_error() {
            error!(status = status.as_u16(), latency_ms, "Request failed");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), latency_ms, "Request rejected");
        } else {
            info!(status = status.as_u16(), latency_ms, "Request completed");
        }

        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
