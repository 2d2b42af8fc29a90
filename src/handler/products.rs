//! Product handlers
//!
//! `GET /products/{id}` and `POST /products/{id}/details`.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::Response;

use super::error::RequestError;
use crate::config::AppState;
use crate::http;
use crate::product::Product;

/// Fetch a product by identifier
pub fn get_product(state: &AppState, id: i32) -> Result<Response<Full<Bytes>>, RequestError> {
    tracing::info!(product_id = id, "get product");

    let product = state.store.get(id)?.ok_or(RequestError::NotFound)?;
    Ok(http::build_json_response(&product))
}

/// Create or replace the details stored under `id`
///
/// The path identifier is the storage key; the body's own `product_id` is
/// stored untouched. Nothing is written unless the whole body decodes.
pub async fn add_product_details<B>(
    state: &AppState,
    id: i32,
    body: B,
) -> Result<Response<Full<Bytes>>, RequestError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    tracing::info!(product_id = id, "add product details");

    let bytes = read_body(body, state.config.http.max_body_size).await?;
    let product = Product::from_json(&bytes).map_err(|e| {
        tracing::debug!(product_id = id, error = %e, "rejected product body");
        RequestError::InvalidBody
    })?;

    tracing::debug!(product_id = id, ?product, "stored product details");
    state.store.put(id, product)?;

    Ok(http::build_204_response())
}

/// Collect a request body, enforcing the configured size limit
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, RequestError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            crate::logger::log_warning(&format!(
                "Request body exceeded {max_body_size} bytes"
            ));
            Err(RequestError::PayloadTooLarge)
        }
        Err(e) => {
            crate::logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(RequestError::BodyRead)
        }
    }
}
