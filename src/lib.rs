//! Krill Server - team task management backend
//!
//! A single-binary HTTP API over an embedded SurrealDB store:
//!
//! - **Auth** (`auth`): JWT cookie sessions, Argon2 password hashing
//! - **Directory** (`api::employees`): employee records, manager-gated writes
//! - **Tasks** (`api::tasks`): role-scoped task CRUD with embedded comments
//! - **Database** (`db`): embedded SurrealDB storage and repositories
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT sessions, guards
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    __ __       _ ____
   / //_/_____ (_) / /
  / ,<  / ___// / / /
 / /| |/ /   / / / /
/_/ |_/_/   /_/_/_/
    "#
    );
}
