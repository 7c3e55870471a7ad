//! Authorization guard
//!
//! `require_auth` runs before every protected route: it validates the
//! session cookie, resolves the acting employee from the store, and injects
//! a [`CurrentUser`] into the request extensions. It is a pure gate with no
//! side effects beyond identity resolution.
//!
//! `require_manager` is layered onto manager-only route groups so that the
//! capability requirement is declared once per group instead of branching
//! inside each handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{JwtError, session};
use crate::core::ServerState;
use crate::db::models::{Employee, Role};
use crate::db::repository::EmployeeRepository;
use crate::utils::AppError;

/// Routes reachable without a session
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/signup", "/api/auth/login", "/api/health"];

/// Acting identity resolved for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_manager(&self) -> bool {
        self.role.is_manager()
    }
}

impl From<&Employee> for CurrentUser {
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

/// Authentication middleware: requires a valid session
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight never carries credentials
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API paths fall through to their own 404
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let Some(token) = session::session_token(req.headers()) else {
        tracing::warn!(target: "security", uri = %req.uri(), "Request without session cookie");
        return Err(AppError::unauthorized());
    };

    let claims = state
        .get_jwt_service()
        .validate_token(&token)
        .map_err(|e| {
            tracing::warn!(target: "security", error = %e, uri = %req.uri(), "Session validation failed");
            match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token(),
            }
        })?;

    // Token is valid but the employee may have been deleted since issuance
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_id(&claims.sub)
        .await
        .map_err(|_| AppError::unauthorized())?
        .ok_or_else(AppError::unauthorized)?;

    req.extensions_mut().insert(CurrentUser::from(&employee));
    Ok(next.run(req).await)
}

/// Role gate: requires the Manager role
///
/// Layered onto manager-only route groups, after `require_auth`.
pub async fn require_manager(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;

    if !user.is_manager() {
        tracing::warn!(
            target: "security",
            user_id = %user.id,
            "Manager role required"
        );
        return Err(AppError::forbidden("Manager role required"));
    }

    Ok(next.run(req).await)
}
