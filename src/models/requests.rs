//! Request DTOs for the news API
//!
//! Defines the structure of incoming HTTP request bodies and query strings,
//! and turns them into validated domain values.

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::noticia::{ListQuery, NewNoticia, NoticiaChanges, MAX_TITULO_LENGTH};

/// Largest page size a listing may ask for
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Request body for POST /noticias
///
/// Fields are optional at the serde level so that missing ones are reported
/// together with every other validation failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateNoticiaRequest {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
}

impl CreateNoticiaRequest {
    /// Validates the request data, collecting every violated rule.
    pub fn validate(self) -> Result<NewNoticia> {
        let mut errors = Vec::new();

        match self.titulo.as_deref() {
            None | Some("") => errors.push("Title must not be empty".to_string()),
            Some(titulo) => check_titulo_length(titulo, &mut errors),
        }
        if matches!(self.descricao.as_deref(), None | Some("")) {
            errors.push("Description must not be empty".to_string());
        }

        match (self.titulo, self.descricao) {
            (Some(titulo), Some(descricao)) if errors.is_empty() => {
                Ok(NewNoticia { titulo, descricao })
            }
            _ => Err(AppError::InvalidRequest(errors)),
        }
    }
}

/// Request body for PATCH /noticias/:id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateNoticiaRequest {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
}

impl UpdateNoticiaRequest {
    /// Validates the fields that are present.
    pub fn validate(self) -> Result<NoticiaChanges> {
        let mut errors = Vec::new();

        if let Some(titulo) = self.titulo.as_deref() {
            if titulo.is_empty() {
                errors.push("Title must not be empty".to_string());
            }
            check_titulo_length(titulo, &mut errors);
        }
        if self.descricao.as_deref() == Some("") {
            errors.push("Description must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(NoticiaChanges {
                titulo: self.titulo,
                descricao: self.descricao,
            })
        } else {
            Err(AppError::InvalidRequest(errors))
        }
    }
}

fn check_titulo_length(titulo: &str, errors: &mut Vec<String>) {
    if titulo.chars().count() > MAX_TITULO_LENGTH {
        errors.push(format!(
            "Title must be at most {} characters",
            MAX_TITULO_LENGTH
        ));
    }
}

/// Query string for GET /noticias
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl PaginationQuery {
    /// Applies defaults (page 1, limit 10) and range checks.
    ///
    /// An empty search string is treated as no search.
    pub fn validate(self) -> Result<ListQuery> {
        let defaults = ListQuery::default();
        let mut errors = Vec::new();

        let page = self.page.unwrap_or(i64::from(defaults.page));
        if page < 1 {
            errors.push("Page must be at least 1".to_string());
        }
        let limit = self.limit.unwrap_or(i64::from(defaults.limit));
        if limit < 1 {
            errors.push("Limit must be at least 1".to_string());
        } else if limit > MAX_PAGE_LIMIT {
            errors.push(format!("Limit must be at most {}", MAX_PAGE_LIMIT));
        }

        let page = u32::try_from(page).ok();
        let limit = u32::try_from(limit).ok();
        match (page, limit) {
            (Some(page), Some(limit)) if errors.is_empty() => Ok(ListQuery {
                page,
                limit,
                search: self.search.filter(|s| !s.is_empty()),
            }),
            (None, _) if errors.is_empty() => Err(AppError::invalid("Page is too large")),
            _ => Err(AppError::InvalidRequest(errors)),
        }
    }
}
