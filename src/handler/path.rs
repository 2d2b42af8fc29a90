//! Product path parsing
//!
//! Splits `/products/{id}` and `/products/{id}/details` into an identifier
//! and a details flag.

use super::error::RequestError;

/// Prefix shared by every product route
pub const PRODUCTS_PREFIX: &str = "/products/";

const DETAILS_SEGMENT: &str = "details";

/// A parsed product route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductPath {
    pub id: i32,
    pub details: bool,
}

/// Check whether a path belongs to the product routes
pub fn is_product_path(path: &str) -> bool {
    path.starts_with(PRODUCTS_PREFIX)
}

/// Parse a path already known to start with [`PRODUCTS_PREFIX`]
pub fn parse_product_path(path: &str) -> Result<ProductPath, RequestError> {
    let rest = path.strip_prefix(PRODUCTS_PREFIX).unwrap_or(path);
    if rest.is_empty() {
        return Err(RequestError::MissingId);
    }

    let (id_text, details) = split_details(rest);
    let id_text = id_text.trim_matches('/');

    let id = id_text
        .parse::<i32>()
        .map_err(|_| RequestError::InvalidId)?;

    Ok(ProductPath { id, details })
}

/// Strip a trailing `details` segment, if any
fn split_details(rest: &str) -> (&str, bool) {
    let trimmed = rest.trim_end_matches('/');
    if trimmed == DETAILS_SEGMENT {
        return ("", true);
    }
    trimmed
        .strip_suffix(DETAILS_SEGMENT)
        .filter(|head| head.ends_with('/'))
        .map_or((rest, false), |head| (head, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(path: &str) -> Result<ProductPath, RequestError> {
        parse_product_path(path)
    }

    fn at(id: i32, details: bool) -> ProductPath {
        ProductPath { id, details }
    }

    #[test]
    fn test_plain_product_path() {
        assert_eq!(parse("/products/42").unwrap(), at(42, false));
        assert_eq!(parse("/products/42/").unwrap(), at(42, false));
    }

    #[test]
    fn test_details_path() {
        assert_eq!(parse("/products/42/details").unwrap(), at(42, true));
        assert_eq!(parse("/products/42/details/").unwrap(), at(42, true));
        assert_eq!(parse("/products/-7//details").unwrap(), at(-7, true));
    }

    #[test]
    fn test_i32_bounds() {
        assert_eq!(parse("/products/2147483647").unwrap().id, i32::MAX);
        assert_eq!(parse("/products/-2147483648").unwrap().id, i32::MIN);
        assert!(matches!(
            parse("/products/2147483648"),
            Err(RequestError::InvalidId)
        ));
    }

    #[test]
    fn test_missing_identifier() {
        assert!(matches!(parse("/products/"), Err(RequestError::MissingId)));
    }

    #[test]
    fn test_invalid_identifier() {
        assert!(matches!(parse("/products/abc"), Err(RequestError::InvalidId)));
        assert!(matches!(parse("/products/1.5"), Err(RequestError::InvalidId)));
        assert!(matches!(parse("/products/42/extra"), Err(RequestError::InvalidId)));
        // "details" must be its own segment
        assert!(matches!(parse("/products/42details"), Err(RequestError::InvalidId)));
        // Nothing left once the suffix is removed
        assert!(matches!(parse("/products/details"), Err(RequestError::InvalidId)));
        assert!(matches!(parse("/products//"), Err(RequestError::InvalidId)));
    }

    #[test]
    fn test_is_product_path() {
        assert!(is_product_path("/products/1"));
        assert!(is_product_path("/products/"));
        assert!(!is_product_path("/products"));
        assert!(!is_product_path("/healthz"));
    }
}
