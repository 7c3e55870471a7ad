//! Auth API module
//!
//! `/api/auth/signup` and `/api/auth/login` are public; the rest run behind
//! the session guard.

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Public routes - skipped by the auth middleware
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        // Protected routes
        .route("/logout", post(handler::logout))
        .route("/me", get(handler::me))
        .route("/change-password", post(handler::change_password))
}
