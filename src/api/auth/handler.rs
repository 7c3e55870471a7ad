//! Auth API Handlers
//!
//! Signup, login, logout, profile and password change.

use axum::{
    Extension,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::extract::Json;
use crate::auth::{CurrentUser, clear_session_cookie, session_cookie};
use crate::core::ServerState;
use crate::db::models::{ChangePasswordRequest, Employee, EmployeeCreate, Role};
use crate::db::repository::EmployeeRepository;
use crate::utils::{AppError, AppResult};

/// Signup request payload
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub position: String,
    pub department: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Short profile returned by signup and login
#[derive(Debug, Serialize)]
pub struct SessionProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&Employee> for SessionProfile {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            role: employee.role,
        }
    }
}

/// Register a new account
///
/// Self-registration always yields a Manager; staff accounts are created
/// through the directory API instead.
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    if req.email.trim().is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    if req.password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .create(
            EmployeeCreate {
                name: req.name,
                email: req.email,
                position: req.position,
                department: req.department,
                phone: req.phone,
                skills: req.skills,
            },
            Role::Manager,
            &req.password,
        )
        .await?;

    let profile = SessionProfile::from(&employee);
    let token = state
        .get_jwt_service()
        .generate_token(&profile.id)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %profile.id, email = %profile.email, "Account created");

    Ok((
        StatusCode::CREATED,
        [(
            header::SET_COOKIE,
            session_cookie(&token, state.config.secure_cookies()),
        )],
        Json(profile),
    ))
}

/// Authenticate and open a session
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let repo = EmployeeRepository::new(state.get_db());

    // Same failure for unknown email and wrong password
    let employee = repo
        .find_by_email(&req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let password_valid = employee
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        return Err(AppError::invalid_credentials());
    }

    let profile = SessionProfile::from(&employee);
    let token = state
        .get_jwt_service()
        .generate_token(&profile.id)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %profile.id, "User logged in");

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&token, state.config.secure_cookies()),
        )],
        Json(profile),
    ))
}

/// Close the session
///
/// Stateless tokens cannot be revoked server-side; the cookie is simply
/// overwritten with an expired empty value. Always succeeds.
pub async fn logout(Extension(user): Extension<CurrentUser>) -> impl IntoResponse {
    tracing::info!(user_id = %user.id, "User logged out");

    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({ "message": "Logged out" })),
    )
}

/// Current user's full public profile
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(employee))
}

/// Change the current user's password
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<impl IntoResponse> {
    if req.new_password.is_empty() {
        return Err(AppError::validation("New password is required"));
    }

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let current_valid = employee
        .verify_password(&req.current_password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !current_valid {
        return Err(AppError::validation("Invalid current password"));
    }

    repo.set_password(&user.id, &req.new_password).await?;

    tracing::info!(user_id = %user.id, "Password changed");

    Ok(Json(json!({ "message": "Password updated successfully" })))
}
