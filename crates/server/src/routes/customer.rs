use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use common::pagination::{Page, PageRequest};
use serde::Deserialize;
use service::dto::{CustomerDto, CustomerUpsert};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::routes::ServerState;

pub const CUSTOMER_PATH: &str = "/api/v1/customer";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListParams {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<CustomerListParams>,
) -> Result<Json<Page<CustomerDto>>, ApiError> {
    let page = PageRequest { page_number: params.page_number, page_size: params.page_size };
    Ok(Json(state.customers.list(page).await?))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerDto>, ApiError> {
    match state.customers.get_by_id(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CustomerUpsert>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.customers.create(input).await?;
    let location = format!("{CUSTOMER_PATH}/{}", created.id);
    Ok((StatusCode::CREATED, AppendHeaders([(header::LOCATION, location)])))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CustomerUpsert>,
) -> Result<StatusCode, ApiError> {
    match state.customers.update_by_id(id, input).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::NotFound),
    }
}

pub async fn patch(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CustomerUpsert>,
) -> Result<StatusCode, ApiError> {
    match state.customers.patch_by_id(id, input).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::NotFound),
    }
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.customers.delete_by_id(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
