//! Request and Response models for the key cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::AddKeysRequest;
pub use responses::{ErrorResponse, HealthResponse, KeyResponse, StatsResponse};
