//! API Module
//!
//! HTTP handlers and routing for the key cache REST API.
//!
//! # Endpoints
//! - `PUT /keys/:kid` - Offer a downloaded key set, get back the key `kid`
//! - `GET /keys/:kid` - Look up a cached key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
