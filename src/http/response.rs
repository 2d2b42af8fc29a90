//! HTTP response building module
//!
//! Builders for the responses the product routes produce. Builder failures are
//! logged and degrade to a bare response instead of panicking.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::handler::RequestError;

/// Build 200 JSON response from a serializable value
pub fn build_json_response<T: Serialize>(value: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(value) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_text_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error: serialization failed",
            );
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 204 No Content response
pub fn build_204_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("204", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response for paths outside the product routes
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "404 Not Found")
}

/// Build health check response (200 OK with plain text body)
pub fn build_health_response(body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .header("Cache-Control", "no-cache, no-store")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::from_static(body.as_bytes())))
        })
}

/// Build the response for a failed request
///
/// A missing product answers with an empty body. Other errors carry their
/// message as plain text, and 405 advertises the allowed methods.
pub fn build_error_response(err: &RequestError) -> Response<Full<Bytes>> {
    let status = err.status();
    let mut builder = Response::builder().status(status);

    let body = match err {
        RequestError::NotFound => Bytes::new(),
        RequestError::MethodNotAllowed { allow } => {
            builder = builder
                .header("Allow", *allow)
                .header("Content-Type", "text/plain");
            Bytes::from(err.to_string())
        }
        _ => {
            builder = builder.header("Content-Type", "text/plain");
            Bytes::from(err.to_string())
        }
    };

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(status.as_str(), &e);
        Response::new(Full::new(Bytes::new()))
    })
}

fn build_text_response(status: StatusCode, text: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from_static(text.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from_static(text.as_bytes())))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
