//! Task routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::*;
use crate::models::Task;

pub async fn create(
    State(ctx): State<ApiContext>,
    body: Result<Json<Task>, JsonRejection>,
) -> Result<Json<TaskCreated>, ApiError> {
    let Json(task) = body?;
    let task_id = ctx.controller.create_task(task)?;
    Ok(Json(TaskCreated { task_id }))
}

pub async fn read(
    State(ctx): State<ApiContext>,
    Path(task_id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(ctx.controller.read_task(&task_id)?))
}

/// Path id overrides any `taskId` in the body.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(task_id): Path<String>,
    body: Result<Json<Task>, JsonRejection>,
) -> Result<Json<StatusResponse>, ApiError> {
    let Json(mut task) = body?;
    task.task_id = task_id;
    ctx.controller.update_task(&task)?;
    Ok(Json(StatusResponse::completed()))
}

pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(task_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    ctx.controller.delete_task(&task_id)?;
    Ok(Json(StatusResponse::completed()))
}
