//! Request DTOs for the key cache API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::cache::MAX_KID_LENGTH;
use crate::jwk::JsonWebKey;

/// Request body for the ADD operation (PUT /keys/:kid)
///
/// Has the shape of a JWKS document, so a freshly downloaded key set can be
/// forwarded as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct AddKeysRequest {
    /// Every key of the downloaded batch
    pub keys: Vec<JsonWebKey>,
}

impl AddKeysRequest {
    /// Validates the request against the identifier it is filed under.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, kid: &str) -> Option<String> {
        if kid.is_empty() {
            return Some("Key identifier cannot be empty".to_string());
        }
        if kid.len() > MAX_KID_LENGTH {
            return Some(format!(
                "Key identifier exceeds maximum length of {} characters",
                MAX_KID_LENGTH
            ));
        }
        None
    }
}
