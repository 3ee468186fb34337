//! In-memory record store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{NoticiaFilter, NoticiaStore, StoreResult};
use crate::models::{NewNoticia, Noticia};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Noticia>,
}

/// Process-local store keyed by id. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryNoticiaStore {
    table: RwLock<Table>,
}

impl InMemoryNoticiaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl NoticiaStore for InMemoryNoticiaStore {
    async fn create(&self, fields: NewNoticia) -> StoreResult<Noticia> {
        let mut table = self.table.write().await;
        table.next_id += 1;

        let now = Utc::now();
        let noticia = Noticia {
            id: table.next_id,
            titulo: fields.titulo,
            descricao: fields.descricao,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(noticia.id, noticia.clone());
        Ok(noticia)
    }

    async fn save(&self, mut noticia: Noticia) -> StoreResult<Noticia> {
        let mut table = self.table.write().await;
        table.next_id = table.next_id.max(noticia.id);

        noticia.updated_at = Utc::now();
        table.rows.insert(noticia.id, noticia.clone());
        Ok(noticia)
    }

    async fn find_page(
        &self,
        filter: &NoticiaFilter,
        offset: u64,
        limit: u32,
    ) -> StoreResult<(Vec<Noticia>, u64)> {
        let table = self.table.read().await;

        let mut matching: Vec<&Noticia> =
            table.rows.values().filter(|n| filter.matches(n)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Noticia>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn remove(&self, noticia: &Noticia) -> StoreResult<()> {
        self.table.write().await.rows.remove(&noticia.id);
        Ok(())
    }
}
