//! Enrollment routes and the enrollment's activity log.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::*;
use crate::models::Enrollment;

/// `POST /v1/ply/enrollment` — also records the "Enrollment created" activity.
pub async fn create(
    State(ctx): State<ApiContext>,
    body: Result<Json<Enrollment>, JsonRejection>,
) -> Result<Json<EnrollmentCreated>, ApiError> {
    let Json(enrollment) = body?;
    let enrollment_id = ctx.controller.create_enrollment(enrollment)?;
    Ok(Json(EnrollmentCreated { enrollment_id }))
}

pub async fn read(
    State(ctx): State<ApiContext>,
    Path(enrollment_id): Path<String>,
) -> Result<Json<Enrollment>, ApiError> {
    Ok(Json(ctx.controller.read_enrollment(&enrollment_id)?))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(enrollment_id): Path<String>,
    body: Result<Json<Enrollment>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(mut enrollment) = body?;
    enrollment.enrollment_id = enrollment_id;
    ctx.controller.update_enrollment(&enrollment)?;
    Ok(Json(StatusResponse::completed()))
}

pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(enrollment_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    ctx.controller.delete_enrollment(&enrollment_id)?;
    Ok(Json(StatusResponse::completed()))
}

/// Activities are not removed with their enrollment and stay listable.
pub async fn activities(
    State(ctx): State<ApiContext>,
    Path(enrollment_id): Path<String>,
) -> Result<Json<ActivityList>, ApiError> {
    let activities = ctx.controller.list_activities(&enrollment_id)?;
    Ok(Json(ActivityList { activities }))
}
