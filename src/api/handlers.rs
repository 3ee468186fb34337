//! API Handlers
//!
//! HTTP request handlers for the news endpoints, cache diagnostics and health.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    Json,
};

use crate::api::extract::{AppJson, AppPath, AppQuery};
use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    CreateNoticiaRequest, HealthResponse, Noticia, PaginationQuery, UpdateNoticiaRequest,
};
use crate::service::NoticiasService;
use crate::store::NoticiaStore;

/// Header carrying the total number of records matching a listing
pub static X_TOTAL_COUNT: HeaderName = HeaderName::from_static("x-total-count");

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// News operations, including the listing cache
    pub noticias: NoticiasService,
    /// Origin allowed by CORS
    pub frontend_url: String,
}

impl AppState {
    /// Creates a new AppState from configuration.
    ///
    /// Builds the listing cache with the configured TTL over `store`.
    pub fn from_config(config: &Config, store: Arc<dyn NoticiaStore>) -> Self {
        let cache = CacheStore::new(config.cache_ttl_ms);
        Self {
            noticias: NoticiasService::new(store, cache),
            frontend_url: config.frontend_url.clone(),
        }
    }
}

/// Handler for POST /noticias
pub async fn create_handler(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateNoticiaRequest>,
) -> Result<(StatusCode, Json<Noticia>)> {
    let fields = req.validate()?;
    let noticia = state.noticias.create(fields).await?;

    Ok((StatusCode::CREATED, Json(noticia)))
}

/// Handler for GET /noticias
///
/// Responds with the page's records; the total match count travels in the
/// `X-Total-Count` header.
pub async fn list_handler(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PaginationQuery>,
) -> Result<(HeaderMap, Json<Vec<Noticia>>)> {
    let query = query.validate()?;
    let page = state.noticias.find_all(&query).await?;

    let mut headers = HeaderMap::new();
    headers.insert(X_TOTAL_COUNT.clone(), HeaderValue::from(page.total));

    Ok((headers, Json(page.data.clone())))
}

/// Handler for GET /noticias/:id
pub async fn get_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<Noticia>> {
    let noticia = state.noticias.find_one(id).await?;
    Ok(Json(noticia))
}

/// Handler for PATCH /noticias/:id
pub async fn update_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateNoticiaRequest>,
) -> Result<Json<Noticia>> {
    let changes = req.validate()?;
    let noticia = state.noticias.update(id, changes).await?;

    Ok(Json(noticia))
}

/// Handler for DELETE /noticias/:id
pub async fn delete_handler(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    state.noticias.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.noticias.cache_stats().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
