//! Record Store Module
//!
//! Persistence boundary for news items. The service only talks to the
//! `NoticiaStore` trait; PostgreSQL backs it in production and an in-memory
//! map backs it in tests and database-less runs.

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewNoticia, Noticia};

pub use memory::InMemoryNoticiaStore;
pub use postgres::PgNoticiaStore;

// == Store Error ==
/// Failure reported by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database driver or connection failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store could not serve the request for another reason
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Listing filter. `search` matches title or description, case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticiaFilter {
    pub search: Option<String>,
}

impl NoticiaFilter {
    /// True if `noticia` passes the filter.
    pub fn matches(&self, noticia: &Noticia) -> bool {
        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                noticia.titulo.to_lowercase().contains(&term)
                    || noticia.descricao.to_lowercase().contains(&term)
            }
        }
    }
}

// == Store Trait ==
/// Operations the news service needs from persistence.
///
/// Listings are always ordered newest first.
#[async_trait]
pub trait NoticiaStore: Send + Sync {
    /// Inserts a new record and returns it with its assigned id and timestamps.
    async fn create(&self, fields: NewNoticia) -> StoreResult<Noticia>;

    /// Inserts or updates `noticia` by id, refreshing `updated_at`.
    async fn save(&self, noticia: Noticia) -> StoreResult<Noticia>;

    /// Returns one page of matching records plus the total match count.
    async fn find_page(
        &self,
        filter: &NoticiaFilter,
        offset: u64,
        limit: u32,
    ) -> StoreResult<(Vec<Noticia>, u64)>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Noticia>>;

    async fn remove(&self, noticia: &Noticia) -> StoreResult<()>;
}
