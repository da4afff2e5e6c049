//! SeaORM data access for the beer table. Business rules (validation, patch
//! merge, version checks) live in `crate::beer::service`; these functions only
//! translate to queries.

use models::beer::{self, BeerStyle};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::errors::ServiceError;

/// Optional equality/substring filters applied to a beer listing.
#[derive(Clone, Debug, Default)]
pub struct BeerListFilter {
    /// case-insensitive substring match on the beer name
    pub beer_name: Option<String>,
    pub beer_style: Option<BeerStyle>,
}

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

/// List one page of beers plus the total match count.
/// Ordered by creation time then id so pages are stable.
pub async fn list_beers(
    db: &DatabaseConnection,
    filter: &BeerListFilter,
    page_idx: u64,
    per_page: u64,
) -> Result<(Vec<beer::Model>, u64), ServiceError> {
    let mut query = beer::Entity::find();
    if let Some(style) = filter.beer_style {
        query = query.filter(beer::Column::BeerStyle.eq(style));
    }
    if let Some(name) = filter.beer_name.as_deref() {
        let pattern = format!("%{}%", name.to_lowercase());
        query = query.filter(
            Expr::expr(Func::lower(Expr::col((beer::Entity, beer::Column::BeerName))))
                .like(pattern),
        );
    }
    let paginator = query
        .order_by_asc(beer::Column::CreatedAt)
        .order_by_asc(beer::Column::Id)
        .paginate(db, per_page);
    let total = paginator.num_items().await.map_err(db_err)?;
    let rows = paginator.fetch_page(page_idx).await.map_err(db_err)?;
    Ok((rows, total))
}

pub async fn get_beer(db: &DatabaseConnection, id: Uuid) -> Result<Option<beer::Model>, ServiceError> {
    beer::Entity::find_by_id(id).one(db).await.map_err(db_err)
}

/// Natural-key lookup used by the CSV import dedup.
pub async fn get_beer_by_upc(db: &DatabaseConnection, upc: &str) -> Result<Option<beer::Model>, ServiceError> {
    beer::Entity::find()
        .filter(beer::Column::Upc.eq(upc))
        .one(db)
        .await
        .map_err(db_err)
}

pub async fn insert_beer(db: &DatabaseConnection, m: beer::Model) -> Result<beer::Model, ServiceError> {
    m.into_active_model()
        .reset_all()
        .insert(db)
        .await
        .map_err(db_err)
}

/// Overwrite every column of an existing row from `m` (keyed by `m.id`).
pub async fn save_beer(db: &DatabaseConnection, m: beer::Model) -> Result<beer::Model, ServiceError> {
    m.into_active_model()
        .reset_all()
        .update(db)
        .await
        .map_err(db_err)
}

/// Returns whether a row was actually removed.
pub async fn delete_beer(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = beer::Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(res.rows_affected > 0)
}
