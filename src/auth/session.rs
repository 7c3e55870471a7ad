//! Session cookie handling
//!
//! The session token travels in an httpOnly, SameSite=Strict cookie. The
//! `Secure` attribute is added outside local development. Logout is purely
//! client-side: the cookie is overwritten with an empty, already-expired
//! value.

use http::{HeaderMap, HeaderValue};

/// Session cookie name
pub const SESSION_COOKIE: &str = "krill_session";

/// Cookie lifetime: 30 days, matching the token expiry
const SESSION_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// Extract the session token from the request's Cookie header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookie = headers.get(http::header::COOKIE)?;
    let s = cookie.to_str().ok()?;
    for part in s.split(';') {
        let p = part.trim();
        if let Some(eq) = p.find('=') {
            let (k, v) = p.split_at(eq);
            if k == SESSION_COOKIE {
                return Some(v[1..].to_string());
            }
        }
    }
    None
}

/// Build the Set-Cookie value carrying a fresh session token
pub fn session_cookie(token: &str, secure: bool) -> HeaderValue {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        SESSION_COOKIE, token, SESSION_MAX_AGE_SECS
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).expect("cookie value is ASCII")
}

/// Build the Set-Cookie value that clears the session
pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static(
        "krill_session=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Strict; Path=/",
    )
}
