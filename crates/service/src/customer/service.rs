use std::sync::Arc;

use chrono::Utc;
use common::pagination::{Page, PageLimits, PageRequest};
use tracing::info;
use uuid::Uuid;

use crate::beer::service::check_version;
use crate::customer::repository::CustomerRepository;
use crate::dto::{CustomerDto, CustomerUpsert};
use crate::errors::ServiceError;

/// Application service for the customer resource; same contract as
/// `BeerService` minus the listing filters.
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
    limits: PageLimits,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>, limits: PageLimits) -> Self {
        Self { repo, limits }
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<CustomerDto>, ServiceError> {
        let (page_idx, per_page) = page.normalize(self.limits);
        let (rows, total) = self.repo.list(page_idx, per_page).await?;
        let content = rows.into_iter().map(CustomerDto::from_model).collect();
        Ok(Page::new(content, total, page_idx, per_page))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<CustomerDto>, ServiceError> {
        Ok(self.repo.find_by_id(id).await?.map(CustomerDto::from_model))
    }

    pub async fn create(&self, input: CustomerUpsert) -> Result<CustomerDto, ServiceError> {
        let violations = input.validate_full();
        if !violations.is_empty() {
            return Err(ServiceError::Invalid(violations));
        }
        let now = Utc::now().into();
        let model = models::customer::Model {
            id: Uuid::new_v4(),
            version: 1,
            name: input.name.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        let stored = self.repo.insert(model).await?;
        info!(id = %stored.id, "created customer");
        Ok(CustomerDto::from_model(stored))
    }

    pub async fn update_by_id(
        &self,
        id: Uuid,
        input: CustomerUpsert,
    ) -> Result<Option<CustomerDto>, ServiceError> {
        let violations = input.validate_full();
        if !violations.is_empty() {
            return Err(ServiceError::Invalid(violations));
        }
        let Some(mut found) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };
        check_version(input.version, found.version, id)?;

        found.name = input.name.unwrap_or_default();
        found.version += 1;
        found.updated_at = Utc::now().into();

        let stored = self.repo.save(found).await?;
        Ok(Some(CustomerDto::from_model(stored)))
    }

    pub async fn patch_by_id(
        &self,
        id: Uuid,
        input: CustomerUpsert,
    ) -> Result<Option<CustomerDto>, ServiceError> {
        let violations = input.validate_partial();
        if !violations.is_empty() {
            return Err(ServiceError::Invalid(violations));
        }
        let Some(mut found) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };
        check_version(input.version, found.version, id)?;

        if let Some(name) = input.name.filter(|s| !s.trim().is_empty()) {
            found.name = name;
        }
        found.version += 1;
        found.updated_at = Utc::now().into();

        let stored = self.repo.save(found).await?;
        Ok(Some(CustomerDto::from_model(stored)))
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let removed = self.repo.delete(id).await?;
        if removed {
            info!(%id, "deleted customer");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::repository::InMemoryCustomerRepository;

    fn svc() -> CustomerService {
        CustomerService::new(Arc::new(InMemoryCustomerRepository::new()), PageLimits::default())
    }

    fn named(name: &str) -> CustomerUpsert {
        CustomerUpsert { name: Some(name.to_string()), version: None }
    }

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let svc = svc();
        let created = svc.create(named("John Doe")).await.unwrap();
        assert_eq!(created.version, 1);
        let fetched = svc.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_without_name_is_invalid() {
        let svc = svc();
        let err = svc.create(CustomerUpsert::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn patch_unknown_id_changes_nothing() {
        let svc = svc();
        let outcome = svc.patch_by_id(Uuid::new_v4(), named("X")).await.unwrap();
        assert!(outcome.is_none());
        let page = svc.list(PageRequest::default()).await.unwrap();
        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn patch_blank_name_is_a_noop_on_the_field() {
        let svc = svc();
        let created = svc.create(named("Keep")).await.unwrap();
        let patched = svc
            .patch_by_id(created.id, CustomerUpsert { name: Some(" ".into()), version: None })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched.name, "Keep");
        assert_eq!(patched.version, 2);
    }

    #[tokio::test]
    async fn update_bumps_version_and_respects_conflicts() {
        let svc = svc();
        let created = svc.create(named("Before")).await.unwrap();

        let updated = svc.update_by_id(created.id, named("After")).await.unwrap().unwrap();
        assert_eq!(updated.name, "After");
        assert_eq!(updated.version, 2);

        let mut stale = named("Too Late");
        stale.version = Some(1);
        let err = svc.update_by_id(created.id, stale).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_then_list_is_empty() {
        let svc = svc();
        let created = svc.create(named("Gone Soon")).await.unwrap();
        assert!(svc.delete_by_id(created.id).await.unwrap());
        assert!(!svc.delete_by_id(created.id).await.unwrap());
        let page = svc.list(PageRequest::default()).await.unwrap();
        assert!(page.content.is_empty());
    }
}
