//! News record and the shapes used to create, change and page through it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title length, in characters
pub const MAX_TITULO_LENGTH: usize = 200;

/// A stored news item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Noticia {
    pub id: i64,
    pub titulo: String,
    pub descricao: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Noticia {
    /// Applies the fields present in `changes`, leaving the rest untouched.
    pub fn apply(&mut self, changes: NoticiaChanges) {
        if let Some(titulo) = changes.titulo {
            self.titulo = titulo;
        }
        if let Some(descricao) = changes.descricao {
            self.descricao = descricao;
        }
    }
}

/// Fields for a news item that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNoticia {
    pub titulo: String,
    pub descricao: String,
}

/// Partial update; `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticiaChanges {
    pub titulo: Option<String>,
    pub descricao: Option<String>,
}

/// Validated listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size, 1..=100
    pub limit: u32,
    /// Case-insensitive "contains" filter on title or description
    pub search: Option<String>,
}

impl ListQuery {
    /// Number of records to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
        }
    }
}

/// One page of a listing, as returned by the read path and kept in the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticiaPage {
    pub data: Vec<Noticia>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl NoticiaPage {
    /// Builds a page, deriving `total_pages = ceil(total / limit)`.
    pub fn new(data: Vec<Noticia>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}
