//! Task Handlers
//!
//! Listing is role-scoped: managers see every task, employees only their
//! own. Read responses resolve assignee and comment authors against the
//! employee directory in one pass.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extract::Json;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Comment, Task, TaskCreate, TaskResponse, TaskUpdate};
use crate::db::repository::{EmployeeRepository, TaskRepository};
use crate::utils::{AppError, AppResult};

/// New comment payload
#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// List tasks visible to the caller
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let repo = TaskRepository::new(state.get_db());
    let tasks = if user.is_manager() {
        repo.find_all().await?
    } else {
        repo.find_assigned_to(&user.id).await?
    };

    let directory = EmployeeRepository::new(state.get_db()).directory().await?;
    let resolved = tasks
        .into_iter()
        .map(|task| TaskResponse::resolve(task, &directory))
        .collect();
    Ok(Json(resolved))
}

/// Fetch a single task
///
/// Scoped like the listing: managers read any task, employees only tasks
/// assigned to them.
pub async fn get(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<TaskResponse>> {
    let repo = TaskRepository::new(state.get_db());
    let task = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    if !user.is_manager() {
        let assigned_to_caller = task
            .assigned_to
            .as_ref()
            .is_some_and(|assignee| assignee.to_string() == user.id);
        if !assigned_to_caller {
            return Err(AppError::forbidden("Not authorized to view this task"));
        }
    }

    resolve(&state, task).await
}

/// Create a task (manager only)
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<TaskCreate>,
) -> AppResult<impl IntoResponse> {
    if req.title.trim().is_empty() {
        return Err(AppError::validation("Title is required"));
    }

    let repo = TaskRepository::new(state.get_db());
    let task = repo.create(req).await?;

    tracing::info!(
        task_id = %task.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        "Task created"
    );

    Ok((StatusCode::CREATED, Json(task)))
}

/// Partially update a task
///
/// Managers may patch any field; employees may only move the status, and a
/// patch without a status change is rejected outright. A missing task is
/// reported before the role check.
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<TaskUpdate>,
) -> AppResult<Json<TaskResponse>> {
    let repo = TaskRepository::new(state.get_db());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    let patch = if user.is_manager() {
        req
    } else {
        req.restrict_to_status()
            .ok_or_else(|| AppError::forbidden("Employees can only update task status"))?
    };

    let task = repo.update(&id, patch).await?;
    resolve(&state, task).await
}

/// Delete a task and its comments (manager only)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = TaskRepository::new(state.get_db());
    let deleted = repo.delete(&id).await?;

    tracing::info!(task_id = %id, "Task deleted");

    Ok(Json(deleted))
}

/// Append a comment authored by the caller
pub async fn add_comment(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> AppResult<impl IntoResponse> {
    if req.text.trim().is_empty() {
        return Err(AppError::validation("Comment text is required"));
    }

    let created_by = user
        .id
        .parse()
        .map_err(|_| AppError::internal(format!("Invalid user ID: {}", user.id)))?;
    let comment = Comment {
        id: Uuid::new_v4().to_string(),
        text: req.text,
        created_by,
        created_at: Utc::now(),
    };

    let repo = TaskRepository::new(state.get_db());
    let task = repo.add_comment(&id, comment).await?;
    let response = resolve(&state, task).await?;
    Ok((StatusCode::CREATED, response))
}

/// Delete a comment, allowed for its author or any manager
pub async fn delete_comment(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path((id, comment_id)): Path<(String, String)>,
) -> AppResult<Json<TaskResponse>> {
    let repo = TaskRepository::new(state.get_db());
    let task = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    let comment = task
        .comments
        .iter()
        .find(|c| c.id == comment_id)
        .ok_or_else(|| AppError::not_found("Comment not found"))?;

    if !user.is_manager() && comment.created_by.to_string() != user.id {
        return Err(AppError::forbidden("Not authorized to delete this comment"));
    }

    let task = repo.remove_comment(&id, &comment_id).await?;
    resolve(&state, task).await
}

async fn resolve(state: &ServerState, task: Task) -> AppResult<Json<TaskResponse>> {
    let directory = EmployeeRepository::new(state.get_db()).directory().await?;
    Ok(Json(TaskResponse::resolve(task, &directory)))
}
