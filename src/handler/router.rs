//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: size checks, route matching,
//! method validation and dispatch to the product handlers.

use crate::config::{AppState, RoutesConfig};
use crate::handler::error::RequestError;
use crate::handler::path::{self, ProductPath};
use crate::handler::products;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Methods served on the liveness endpoint
const HEALTH_METHODS: &str = "GET, HEAD";

/// Which product handler a request resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    Get,
    Put,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_log = state.config.logging.access_log;
    let entry = access_log.then(|| access_entry(&req, peer_addr));

    let mut response = route_request(req, &state).await;

    if let Ok(value) = state.config.http.server_name.parse() {
        response.headers_mut().insert(hyper::header::SERVER, value);
    }

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        let body_len = response.body().size_hint().exact().unwrap_or(0);
        let elapsed_us = started.elapsed().as_micros();
        entry.body_bytes = usize::try_from(body_len).unwrap_or(usize::MAX);
        entry.request_time_us = u64::try_from(elapsed_us).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path and configuration
async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let routes = &state.config.routes;
    let req_path = req.uri().path();

    // 1. Health check endpoint
    if routes.health.enabled && req_path == routes.health.liveness_path {
        return match *req.method() {
            Method::GET | Method::HEAD => http::build_health_response("ok"),
            _ => {
                let err = RequestError::MethodNotAllowed {
                    allow: HEALTH_METHODS,
                };
                http::build_error_response(&err)
            }
        };
    }

    // 2. Product routes
    if path::is_product_path(req_path) {
        return match dispatch_product(req, state).await {
            Ok(resp) => resp,
            Err(err) => {
                if let RequestError::Store(e) = &err {
                    logger::log_error(&format!("Product store failure: {e}"));
                }
                http::build_error_response(&err)
            }
        };
    }

    http::build_404_response()
}

/// Parse the product path, pick an action and run it
async fn dispatch_product<B>(
    req: Request<B>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, RequestError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let target = path::parse_product_path(req.uri().path())?;
    let content_length_ok = check_body_size(&req, state.config.http.max_body_size);

    match select_action(req.method(), target, &state.config.routes)? {
        ProductAction::Get => products::get_product(state, target.id),
        ProductAction::Put => {
            if !content_length_ok {
                return Err(RequestError::PayloadTooLarge);
            }
            products::add_product_details(state, target.id, req.into_body()).await
        }
    }
}

/// Decide between fetch and write for a parsed product path
///
/// Strict mode only serves reads on the bare path and writes on `/details`.
/// Lenient mode ignores the suffix and goes by method alone.
pub fn select_action(
    method: &Method,
    target: ProductPath,
    routes: &RoutesConfig,
) -> Result<ProductAction, RequestError> {
    if !routes.strict_details {
        return match *method {
            Method::GET => Ok(ProductAction::Get),
            Method::POST => Ok(ProductAction::Put),
            _ => Err(RequestError::MethodNotAllowed { allow: "GET, POST" }),
        };
    }

    match (method, target.details) {
        (&Method::GET, false) => Ok(ProductAction::Get),
        (&Method::POST, true) => Ok(ProductAction::Put),
        (&Method::POST, false) => Err(RequestError::DetailsRequired),
        (_, true) => Err(RequestError::MethodNotAllowed { allow: "POST" }),
        (_, false) => Err(RequestError::MethodNotAllowed { allow: "GET" }),
    }
}

/// Validate Content-Length header against the configured limit
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> bool {
    let Some(content_length) = req.headers().get(hyper::header::CONTENT_LENGTH) else {
        return true;
    };
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            true
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                false
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                true
            }
            _ => true,
        },
    )
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.referer = header_string(req, hyper::header::REFERER);
    entry.user_agent = header_string(req, hyper::header::USER_AGENT);
    entry
}

fn header_string<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
