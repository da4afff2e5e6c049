use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use common::pagination::{Page, PageRequest};
use models::beer::BeerStyle;
use serde::Deserialize;
use service::beer::BeerListQuery;
use service::dto::{BeerDto, BeerUpsert};
use tracing::debug;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::routes::ServerState;

pub const BEER_PATH: &str = "/api/v1/beer";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerListParams {
    pub beer_name: Option<String>,
    pub beer_style: Option<BeerStyle>,
    pub show_inventory: Option<bool>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<BeerListParams>,
) -> Result<Json<Page<BeerDto>>, ApiError> {
    let query = BeerListQuery {
        beer_name: params.beer_name,
        beer_style: params.beer_style,
        show_inventory: params.show_inventory,
        page: PageRequest { page_number: params.page_number, page_size: params.page_size },
    };
    let page = state.beers.list(query).await?;
    debug!(count = page.content.len(), total = page.total_elements, "listed beers");
    Ok(Json(page))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BeerDto>, ApiError> {
    match state.beers.get_by_id(id).await? {
        Some(dto) => Ok(Json(dto)),
        None => Err(ApiError::NotFound),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<BeerUpsert>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.beers.create(input).await?;
    let location = format!("{BEER_PATH}/{}", created.id);
    Ok((StatusCode::CREATED, AppendHeaders([(header::LOCATION, location)])))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<BeerUpsert>,
) -> Result<StatusCode, ApiError> {
    match state.beers.update_by_id(id, input).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::NotFound),
    }
}

pub async fn patch(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<BeerUpsert>,
) -> Result<StatusCode, ApiError> {
    match state.beers.patch_by_id(id, input).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::NotFound),
    }
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.beers.delete_by_id(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
