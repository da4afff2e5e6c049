//! SeaORM data access for the customer table.

use models::customer;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryOrder,
};
use uuid::Uuid;

use crate::errors::ServiceError;

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

pub async fn list_customers(
    db: &DatabaseConnection,
    page_idx: u64,
    per_page: u64,
) -> Result<(Vec<customer::Model>, u64), ServiceError> {
    let paginator = customer::Entity::find()
        .order_by_asc(customer::Column::CreatedAt)
        .order_by_asc(customer::Column::Id)
        .paginate(db, per_page);
    let total = paginator.num_items().await.map_err(db_err)?;
    let rows = paginator.fetch_page(page_idx).await.map_err(db_err)?;
    Ok((rows, total))
}

pub async fn get_customer(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<customer::Model>, ServiceError> {
    customer::Entity::find_by_id(id).one(db).await.map_err(db_err)
}

pub async fn count_customers(db: &DatabaseConnection) -> Result<u64, ServiceError> {
    customer::Entity::find().count(db).await.map_err(db_err)
}

pub async fn insert_customer(
    db: &DatabaseConnection,
    m: customer::Model,
) -> Result<customer::Model, ServiceError> {
    m.into_active_model().reset_all().insert(db).await.map_err(db_err)
}

pub async fn save_customer(
    db: &DatabaseConnection,
    m: customer::Model,
) -> Result<customer::Model, ServiceError> {
    m.into_active_model().reset_all().update(db).await.map_err(db_err)
}

pub async fn delete_customer(db: &DatabaseConnection, id: Uuid) -> Result<bool, ServiceError> {
    let res = customer::Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(res.rows_affected > 0)
}
