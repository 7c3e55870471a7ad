//! Employee Directory Handlers
//!
//! Reads are open to any authenticated user; create, update and delete are
//! gated behind the manager layer in the router.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::api::extract::Json;
use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate, Role};
use crate::db::repository::EmployeeRepository;
use crate::utils::{AppError, AppResult};

/// Directory-created accounts start with a fixed password until the
/// employee changes it through the auth API.
const DEFAULT_EMPLOYEE_PASSWORD: &str = "123456";

/// List the full directory, ordered by name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employees = repo.find_all().await?;
    Ok(Json(employees))
}

/// Create a staff account
///
/// Directory creation always yields the Employee role with the default
/// password; managers come from self-registration only.
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<EmployeeCreate>,
) -> AppResult<impl IntoResponse> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if req.email.trim().is_empty() {
        return Err(AppError::validation("Email is required"));
    }

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .create(req, Role::Employee, DEFAULT_EMPLOYEE_PASSWORD)
        .await?;

    tracing::info!(
        employee_id = %employee.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        "Employee created"
    );

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Partially update an employee record
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.update(&id, req).await?;
    Ok(Json(employee))
}

/// Remove an employee from the directory
///
/// Tasks assigned to the employee are left in place with a dangling
/// reference; read endpoints resolve it to no assignee.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = EmployeeRepository::new(state.get_db());
    let deleted = repo.delete(&id).await?;

    tracing::info!(employee_id = %id, "Employee deleted");

    Ok(Json(deleted))
}
