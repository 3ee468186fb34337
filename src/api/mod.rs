//! API Module
//!
//! HTTP handlers and routing for the news REST API.
//!
//! # Endpoints
//! - `POST /noticias` - Create a news item
//! - `GET /noticias` - Paginated, searchable listing (cached)
//! - `GET|PATCH|DELETE /noticias/:id` - Single-item operations
//! - `GET /cache/stats` - Listing cache statistics
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{AppJson, AppPath, AppQuery};
pub use handlers::*;
pub use routes::create_router;
