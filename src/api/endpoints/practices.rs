//! Practice routes plus the practice-scoped list views.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::*;
use crate::models::Practice;

/// `POST /v1/ply/practice` — also seeds the practice's starter task.
pub async fn create(
    State(ctx): State<ApiContext>,
    body: Result<Json<Practice>, JsonRejection>,
) -> Result<Json<PracticeCreated>, ApiError> {
    let Json(practice) = body?;
    let practice_id = ctx.controller.create_practice(practice)?;
    Ok(Json(PracticeCreated { practice_id }))
}

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<PracticeList>, ApiError> {
    let practices = ctx.controller.list_practices()?;
    Ok(Json(PracticeList { practices }))
}

pub async fn read(
    State(ctx): State<ApiContext>,
    Path(practice_id): Path<String>,
) -> Result<Json<Practice>, ApiError> {
    Ok(Json(ctx.controller.read_practice(&practice_id)?))
}

/// `POST /v1/ply/practice/:practiceId` — the path id wins over the body's.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(practice_id): Path<String>,
    body: Result<Json<Practice>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(mut practice) = body?;
    practice.practice_id = practice_id;
    ctx.controller.update_practice(&practice)?;
    Ok(Json(StatusResponse::completed()))
}

pub async fn locations(
    State(ctx): State<ApiContext>,
    Path(practice_id): Path<String>,
) -> Result<Json<LocationList>, ApiError> {
    let locations = ctx.controller.list_locations(&practice_id)?;
    Ok(Json(LocationList { locations }))
}

pub async fn providers(
    State(ctx): State<ApiContext>,
    Path(practice_id): Path<String>,
) -> Result<Json<ProviderList>, ApiError> {
    let providers = ctx.controller.list_providers(&practice_id)?;
    Ok(Json(ProviderList { providers }))
}

pub async fn tasks(
    State(ctx): State<ApiContext>,
    Path(practice_id): Path<String>,
) -> Result<Json<TaskList>, ApiError> {
    let tasks = ctx.controller.list_tasks(&practice_id)?;
    Ok(Json(TaskList { tasks }))
}

pub async fn enrollments(
    State(ctx): State<ApiContext>,
    Path(practice_id): Path<String>,
) -> Result<Json<EnrollmentList>, ApiError> {
    let enrollments = ctx.controller.list_enrollments(&practice_id)?;
    Ok(Json(EnrollmentList { enrollments }))
}

pub async fn documents(
    State(ctx): State<ApiContext>,
    Path(practice_id): Path<String>,
) -> Result<Json<DocumentList>, ApiError> {
    let documents = ctx.controller.list_documents(&practice_id)?;
    Ok(Json(DocumentList { documents }))
}
