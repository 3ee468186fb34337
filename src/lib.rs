//! Noticias API - news CRUD backend
//!
//! Serves create/list/get/update/delete for news items, with an in-process
//! TTL cache in front of the paginated listing.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use service::NoticiasService;
