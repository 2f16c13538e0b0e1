//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `POST /api/lru` - Store a key-value pair
//! - `GET /api/lru` - List every key and value
//! - `DELETE /api/lru` - Remove every entry
//! - `GET /api/lru/:key` - Retrieve a value by key
//! - `DELETE /api/lru/:key` - Remove a key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
