//! Product record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product details as exchanged over HTTP.
///
/// Every field is optional on input: missing numbers decode as 0 and missing
/// strings as empty. Unknown fields are ignored, and a repeated key keeps
/// its last value. `product_id` is carried as sent and is not reconciled with
/// the storage key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub product_id: i32,
    pub sku: String,
    pub manufacturer: String,
    pub category_id: i32,
    pub weight: i32,
    pub some_other_id: i32,
}

impl Product {
    /// Decode a request body into a product.
    ///
    /// The body is read as a plain JSON object first so duplicate keys
    /// collapse before the typed decode sees them.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_slice(body)?;
        serde_json::from_value(Value::Object(fields))
    }
}
