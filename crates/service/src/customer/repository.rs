use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::customer_service;
use crate::errors::ServiceError;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn list(
        &self,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<models::customer::Model>, u64), ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<models::customer::Model>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    async fn insert(&self, m: models::customer::Model) -> Result<models::customer::Model, ServiceError>;
    async fn save(&self, m: models::customer::Model) -> Result<models::customer::Model, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn list(
        &self,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<models::customer::Model>, u64), ServiceError> {
        customer_service::list_customers(&self.db, page_idx, per_page).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<models::customer::Model>, ServiceError> {
        customer_service::get_customer(&self.db, id).await
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        customer_service::count_customers(&self.db).await
    }

    async fn insert(&self, m: models::customer::Model) -> Result<models::customer::Model, ServiceError> {
        customer_service::insert_customer(&self.db, m).await
    }

    async fn save(&self, m: models::customer::Model) -> Result<models::customer::Model, ServiceError> {
        customer_service::save_customer(&self.db, m).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        customer_service::delete_customer(&self.db, id).await
    }
}

/// Map-backed repository for isolated tests and the `memory` backend.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    rows: RwLock<HashMap<Uuid, models::customer::Model>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn list(
        &self,
        page_idx: u64,
        per_page: u64,
    ) -> Result<(Vec<models::customer::Model>, u64), ServiceError> {
        let rows = self.rows.read().await;
        let mut all: Vec<models::customer::Model> = rows.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        let total = all.len() as u64;
        let page: Vec<_> = all
            .into_iter()
            .skip((page_idx * per_page) as usize)
            .take(per_page as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<models::customer::Model>, ServiceError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.rows.read().await.len() as u64)
    }

    async fn insert(&self, m: models::customer::Model) -> Result<models::customer::Model, ServiceError> {
        self.rows.write().await.insert(m.id, m.clone());
        Ok(m)
    }

    async fn save(&self, m: models::customer::Model) -> Result<models::customer::Model, ServiceError> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&m.id) {
            return Err(ServiceError::not_found("customer"));
        }
        rows.insert(m.id, m.clone());
        Ok(m)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.rows.write().await.remove(&id).is_some())
    }
}
