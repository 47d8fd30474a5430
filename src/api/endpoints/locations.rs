//! Location routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::*;
use crate::models::Location;

pub async fn create(
    State(ctx): State<ApiContext>,
    body: Result<Json<Location>, JsonRejection>,
) -> Result<Json<LocationCreated>, ApiError> {
    let Json(location) = body?;
    let location_id = ctx.controller.create_location(location)?;
    Ok(Json(LocationCreated { location_id }))
}

pub async fn read(
    State(ctx): State<ApiContext>,
    Path(location_id): Path<String>,
) -> Result<Json<Location>, ApiError> {
    Ok(Json(ctx.controller.read_location(&location_id)?))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(location_id): Path<String>,
    body: Result<Json<Location>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(mut location) = body?;
    location.location_id = location_id;
    ctx.controller.update_location(&location)?;
    Ok(Json(StatusResponse::completed()))
}

pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(location_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    ctx.controller.delete_location(&location_id)?;
    Ok(Json(StatusResponse::completed()))
}
