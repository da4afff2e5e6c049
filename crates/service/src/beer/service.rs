use std::sync::Arc;

use chrono::Utc;
use common::pagination::{Page, PageLimits, PageRequest};
use models::beer::BeerStyle;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::beer::repository::BeerRepository;
use crate::db::beer_service::BeerListFilter;
use crate::dto::{BeerDto, BeerUpsert};
use crate::errors::ServiceError;

/// Listing parameters as they arrive from the transport layer.
#[derive(Clone, Debug, Default)]
pub struct BeerListQuery {
    pub beer_name: Option<String>,
    pub beer_style: Option<BeerStyle>,
    /// hide `quantityOnHand` in the result when explicitly set to false
    pub show_inventory: Option<bool>,
    pub page: PageRequest,
}

/// Application service encapsulating beer business rules: DTO mapping,
/// validation, create-time field assignment, patch merge and the optimistic
/// version check. The repository behind it is swappable (database or memory).
pub struct BeerService {
    repo: Arc<dyn BeerRepository>,
    limits: PageLimits,
}

impl BeerService {
    pub fn new(repo: Arc<dyn BeerRepository>, limits: PageLimits) -> Self {
        Self { repo, limits }
    }

    pub async fn list(&self, query: BeerListQuery) -> Result<Page<BeerDto>, ServiceError> {
        let (page_idx, per_page) = query.page.normalize(self.limits);
        let filter = BeerListFilter {
            beer_name: query.beer_name,
            beer_style: query.beer_style,
        };
        let (rows, total) = self.repo.list(&filter, page_idx, per_page).await?;
        let show_inventory = query.show_inventory.unwrap_or(true);
        let content = rows
            .into_iter()
            .map(|m| BeerDto::from_model(m, show_inventory))
            .collect();
        Ok(Page::new(content, total, page_idx, per_page))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<BeerDto>, ServiceError> {
        let found = self.repo.find_by_id(id).await?;
        Ok(found.map(|m| BeerDto::from_model(m, true)))
    }

    /// Assigns a fresh id, version 1 and both timestamps; caller-supplied
    /// values for those fields are ignored.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: BeerUpsert) -> Result<BeerDto, ServiceError> {
        let violations = input.validate_full();
        if !violations.is_empty() {
            return Err(ServiceError::Invalid(violations));
        }
        let now = Utc::now().into();
        let model = models::beer::Model {
            id: Uuid::new_v4(),
            version: 1,
            beer_name: input.beer_name.unwrap_or_default(),
            beer_style: input.beer_style.unwrap_or(BeerStyle::Ale),
            upc: input.upc.unwrap_or_default(),
            quantity_on_hand: input.quantity_on_hand.unwrap_or(0),
            price: input.price.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        let stored = self.repo.insert(model).await?;
        info!(id = %stored.id, name = %stored.beer_name, "created beer");
        Ok(BeerDto::from_model(stored, true))
    }

    /// Full replace of every mutable field. `Ok(None)` when the id is absent;
    /// never creates. A stale caller-supplied version is a conflict.
    pub async fn update_by_id(
        &self,
        id: Uuid,
        input: BeerUpsert,
    ) -> Result<Option<BeerDto>, ServiceError> {
        let violations = input.validate_full();
        if !violations.is_empty() {
            return Err(ServiceError::Invalid(violations));
        }
        let Some(mut found) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };
        check_version(input.version, found.version, id)?;

        found.beer_name = input.beer_name.unwrap_or_default();
        found.beer_style = input.beer_style.unwrap_or(found.beer_style);
        found.upc = input.upc.unwrap_or_default();
        found.quantity_on_hand = input.quantity_on_hand.unwrap_or(0);
        found.price = input.price.unwrap_or_default();
        found.version += 1;
        found.updated_at = Utc::now().into();

        let stored = self.repo.save(found).await?;
        Ok(Some(BeerDto::from_model(stored, true)))
    }

    /// Partial merge: only present fields are applied. A blank string counts
    /// as absent, not as "clear this field".
    pub async fn patch_by_id(
        &self,
        id: Uuid,
        input: BeerUpsert,
    ) -> Result<Option<BeerDto>, ServiceError> {
        let violations = input.validate_partial();
        if !violations.is_empty() {
            return Err(ServiceError::Invalid(violations));
        }
        let Some(mut found) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };
        check_version(input.version, found.version, id)?;

        if let Some(name) = input.beer_name.filter(|s| !s.trim().is_empty()) {
            found.beer_name = name;
        }
        if let Some(style) = input.beer_style {
            found.beer_style = style;
        }
        if let Some(upc) = input.upc.filter(|s| !s.trim().is_empty()) {
            found.upc = upc;
        }
        if let Some(qty) = input.quantity_on_hand {
            found.quantity_on_hand = qty;
        }
        if let Some(price) = input.price {
            found.price = price;
        }
        found.version += 1;
        found.updated_at = Utc::now().into();

        let stored = self.repo.save(found).await?;
        Ok(Some(BeerDto::from_model(stored, true)))
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let removed = self.repo.delete(id).await?;
        if removed {
            info!(%id, "deleted beer");
        }
        Ok(removed)
    }
}

/// Optimistic concurrency: a caller that supplies a version must supply the
/// current one. Callers that omit it write unconditionally.
pub(crate) fn check_version(
    supplied: Option<i32>,
    stored: i32,
    id: Uuid,
) -> Result<(), ServiceError> {
    match supplied {
        Some(v) if v != stored => Err(ServiceError::Conflict(format!(
            "stale version {v} for {id}, current is {stored}"
        ))),
        _ => Ok(()),
    }
}
