use axum::body::Bytes;
use registro_base::Error as RegistryError;
use serde_json::Value;

pub mod pets;
pub mod subjects;

pub use pets::build_routes as build_pet_routes;
pub use subjects::build_routes as build_subject_routes;

/// First value of `key` in the query string. Repeated keys keep the first
/// occurrence instead of rejecting the request.
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.clone())
}

/// Parses the request body. A missing or malformed body is reported as a
/// server error, like any other unreadable payload.
fn read_body(body: &Bytes) -> Result<Value, RegistryError> {
    serde_json::from_slice(body).map_err(|e| RegistryError::Payload(e.to_string()))
}
