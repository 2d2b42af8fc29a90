//! Request error types
//!
//! Every failure a product request can hit, each mapped to one status code.

use hyper::StatusCode;
use thiserror::Error;

use crate::product::StoreError;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("bad request: missing identifier")]
    MissingId,

    #[error("bad request: invalid identifier")]
    InvalidId,

    #[error("bad request: product details must be posted to /details")]
    DetailsRequired,

    #[error("bad request: invalid body")]
    InvalidBody,

    #[error("bad request: failed to read body")]
    BodyRead,

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("method not allowed")]
    MethodNotAllowed { allow: &'static str },

    #[error("not found")]
    NotFound,

    #[error("internal error: {0}")]
    Store(#[from] StoreError),
}

impl RequestError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingId
            | Self::InvalidId
            | Self::DetailsRequired
            | Self::InvalidBody
            | Self::BodyRead => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
