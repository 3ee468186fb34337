//! PostgreSQL record store.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{NoticiaFilter, NoticiaStore, StoreResult};
use crate::models::{NewNoticia, Noticia};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS noticias (
        id BIGSERIAL PRIMARY KEY,
        titulo VARCHAR(200) NOT NULL,
        descricao TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

const FILTER: &str =
    "($1::text IS NULL OR titulo ILIKE $1 ESCAPE '\\' OR descricao ILIKE $1 ESCAPE '\\')";

/// Store backed by the `noticias` table.
#[derive(Debug, Clone)]
pub struct PgNoticiaStore {
    pool: PgPool,
}

impl PgNoticiaStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the `noticias` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

/// Wraps a search term for ILIKE, matching `%` and `_` literally.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[async_trait]
impl NoticiaStore for PgNoticiaStore {
    async fn create(&self, fields: NewNoticia) -> StoreResult<Noticia> {
        let noticia = sqlx::query_as::<_, Noticia>(
            r#"
            INSERT INTO noticias (titulo, descricao)
            VALUES ($1, $2)
            RETURNING id, titulo, descricao, created_at, updated_at
            "#,
        )
        .bind(&fields.titulo)
        .bind(&fields.descricao)
        .fetch_one(&self.pool)
        .await?;

        Ok(noticia)
    }

    async fn save(&self, noticia: Noticia) -> StoreResult<Noticia> {
        let saved = sqlx::query_as::<_, Noticia>(
            r#"
            INSERT INTO noticias (id, titulo, descricao, created_at, updated_at)
            VALUES ($1, $2, $3, $4, now())
            ON CONFLICT (id) DO UPDATE
                SET titulo = EXCLUDED.titulo,
                    descricao = EXCLUDED.descricao,
                    updated_at = now()
            RETURNING id, titulo, descricao, created_at, updated_at
            "#,
        )
        .bind(noticia.id)
        .bind(&noticia.titulo)
        .bind(&noticia.descricao)
        .bind(noticia.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn find_page(
        &self,
        filter: &NoticiaFilter,
        offset: u64,
        limit: u32,
    ) -> StoreResult<(Vec<Noticia>, u64)> {
        let pattern = filter.search.as_deref().map(contains_pattern);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM noticias WHERE {}", FILTER))
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

        let rows = sqlx::query_as::<_, Noticia>(&format!(
            r#"
            SELECT id, titulo, descricao, created_at, updated_at
            FROM noticias
            WHERE {}
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
            FILTER
        ))
        .bind(&pattern)
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((rows, total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Noticia>> {
        let noticia = sqlx::query_as::<_, Noticia>(
            "SELECT id, titulo, descricao, created_at, updated_at FROM noticias WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(noticia)
    }

    async fn remove(&self, noticia: &Noticia) -> StoreResult<()> {
        sqlx::query("DELETE FROM noticias WHERE id = $1")
            .bind(noticia.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("rust"), "%rust%");
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\"), "%c:\\\\%");
    }
}
