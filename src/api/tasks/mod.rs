//! Task API module
//!
//! Creation and deletion are manager-only; updates and comments are open to
//! any authenticated user with per-role rules enforced in the handlers.

mod handler;

use axum::{Router, middleware, routing::delete, routing::get, routing::post};

use crate::auth::require_manager;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tasks", routes())
}

fn routes() -> Router<ServerState> {
    let shared_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get).put(handler::update))
        .route("/{id}/comments", post(handler::add_comment))
        .route(
            "/{id}/comments/{comment_id}",
            delete(handler::delete_comment),
        );

    let manager_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_manager));

    shared_routes.merge(manager_routes)
}
