//! JSON Web Key Module
//!
//! Serde model of a single RFC 7517 key as served by a JWKS endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// == JSON Web Key ==
/// A verification key as published in a key set.
///
/// Only the members the cache needs are typed. Algorithm-specific parameters
/// (`n`, `e`, `crv`, `x`, `y`, ...) are kept verbatim in `params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonWebKey {
    /// Key identifier, the cache key
    #[serde(default)]
    pub kid: String,
    /// Key type (`RSA`, `EC`, `OKP`, ...)
    pub kty: String,
    /// Intended algorithm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Public key use (`sig` or `enc`)
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    /// Remaining key parameters
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl JsonWebKey {
    /// Creates a key with the given identifier and key type and no parameters.
    pub fn new(kid: impl Into<String>, kty: impl Into<String>) -> Self {
        Self {
            kid: kid.into(),
            kty: kty.into(),
            alg: None,
            key_use: None,
            params: Map::new(),
        }
    }

    /// Sets the `alg` member.
    pub fn with_alg(mut self, alg: impl Into<String>) -> Self {
        self.alg = Some(alg.into());
        self
    }

    /// Adds an algorithm-specific parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}
