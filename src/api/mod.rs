//! API Module
//!
//! HTTP handlers and routing for the context cache.
//!
//! # Endpoints
//! - `POST /context/lookup` - Look up the payload for a descriptor
//! - `PUT /context` - Store the payload computed for a descriptor
//! - `DELETE /users/:user_id` - Invalidate every entry of one user
//! - `GET /stats` - Get cache statistics
//! - `DELETE /cache` - Drop every entry
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
