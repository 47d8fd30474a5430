//! Provider routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::*;
use crate::models::Provider;

pub async fn create(
    State(ctx): State<ApiContext>,
    body: Result<Json<Provider>, JsonRejection>,
) -> Result<Json<ProviderCreated>, ApiError> {
    let Json(provider) = body?;
    let provider_id = ctx.controller.create_provider(provider)?;
    Ok(Json(ProviderCreated { provider_id }))
}

pub async fn read(
    State(ctx): State<ApiContext>,
    Path(provider_id): Path<String>,
) -> Result<Json<Provider>, ApiError> {
    Ok(Json(ctx.controller.read_provider(&provider_id)?))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(provider_id): Path<String>,
    body: Result<Json<Provider>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(mut provider) = body?;
    provider.provider_id = provider_id;
    ctx.controller.update_provider(&provider)?;
    Ok(Json(StatusResponse::completed()))
}

pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(provider_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    ctx.controller.delete_provider(&provider_id)?;
    Ok(Json(StatusResponse::completed()))
}
