//! Authentication and authorization
//!
//! - [`jwt`]: signed session tokens (issue/verify)
//! - [`session`]: the cookie the token travels in
//! - [`middleware`]: the per-request guard and role gate

pub mod jwt;
pub mod middleware;
pub mod session;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUser, require_auth, require_manager};
pub use session::{SESSION_COOKIE, clear_session_cookie, session_cookie, session_token};
