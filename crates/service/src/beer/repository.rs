use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::beer_service::{self, BeerListFilter};
use crate::errors::ServiceError;

/// Record store for beers. The application service owns all business rules;
/// implementations only persist and retrieve.
#[async_trait]
pub trait BeerRepository: Send + Sync {
    /// One page of matching rows plus the total match count.
    async fn list(
        &self,
        filter: &BeerListFilter,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<models::beer::Model>, u64), ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<models::beer::Model>, ServiceError>;
    async fn find_by_upc(&self, upc: &str) -> Result<Option<models::beer::Model>, ServiceError>;
    async fn insert(&self, m: models::beer::Model) -> Result<models::beer::Model, ServiceError>;
    /// Full overwrite of an existing row keyed by `m.id`.
    async fn save(&self, m: models::beer::Model) -> Result<models::beer::Model, ServiceError>;
    /// True iff a row was actually removed.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmBeerRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl BeerRepository for SeaOrmBeerRepository {
    async fn list(
        &self,
        filter: &BeerListFilter,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<models::beer::Model>, u64), ServiceError> {
        beer_service::list_beers(&self.db, filter, page_idx, per_page).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<models::beer::Model>, ServiceError> {
        beer_service::get_beer(&self.db, id).await
    }

    async fn find_by_upc(&self, upc: &str) -> Result<Option<models::beer::Model>, ServiceError> {
        beer_service::get_beer_by_upc(&self.db, upc).await
    }

    async fn insert(&self, m: models::beer::Model) -> Result<models::beer::Model, ServiceError> {
        beer_service::insert_beer(&self.db, m).await
    }

    async fn save(&self, m: models::beer::Model) -> Result<models::beer::Model, ServiceError> {
        beer_service::save_beer(&self.db, m).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        beer_service::delete_beer(&self.db, id).await
    }
}

/// Map-backed repository satisfying the same contract; used for isolated
/// tests and the `memory` backend. State does not survive a restart.
#[derive(Default)]
pub struct InMemoryBeerRepository {
    rows: RwLock<HashMap<Uuid, models::beer::Model>>,
}

impl InMemoryBeerRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl BeerRepository for InMemoryBeerRepository {
    async fn list(
        &self,
        filter: &BeerListFilter,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<models::beer::Model>, u64), ServiceError> {
        let rows = self.rows.read().await;
        let mut matches: Vec<models::beer::Model> = rows
            .values()
            .filter(|m| {
                filter.beer_style.map_or(true, |s| m.beer_style == s)
                    && filter.beer_name.as_deref().map_or(true, |n| {
                        m.beer_name.to_lowercase().contains(&n.to_lowercase())
                    })
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        let total = matches.len() as u64;
        let page: Vec<_> = matches
            .into_iter()
            .skip((page_idx * per_page) as usize)
            .take(per_page as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<models::beer::Model>, ServiceError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_upc(&self, upc: &str) -> Result<Option<models::beer::Model>, ServiceError> {
        Ok(self.rows.read().await.values().find(|m| m.upc == upc).cloned())
    }

    async fn insert(&self, m: models::beer::Model) -> Result<models::beer::Model, ServiceError> {
        let mut rows = self.rows.write().await;
        if rows.values().any(|existing| existing.upc == m.upc) {
            return Err(ServiceError::Db(format!("duplicate upc: {}", m.upc)));
        }
        rows.insert(m.id, m.clone());
        Ok(m)
    }

    async fn save(&self, m: models::beer::Model) -> Result<models::beer::Model, ServiceError> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&m.id) {
            return Err(ServiceError::not_found("beer"));
        }
        if rows.values().any(|existing| existing.id != m.id && existing.upc == m.upc) {
            return Err(ServiceError::Db(format!("duplicate upc: {}", m.upc)));
        }
        rows.insert(m.id, m.clone());
        Ok(m)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }
}
