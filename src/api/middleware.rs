use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Extension,
};
use tower_cookies::{Cookies, Key};

use crate::error::AppError;

pub const SESSION_COOKIE: &str = "gardenhub_user";

/// Signing key for the session cookie. Without a configured secret a random
/// key is generated, so sessions do not survive a restart.
pub fn session_key(secret: Option<&str>) -> Key {
    match secret.map(|secret| Key::try_from(secret.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            tracing::warn!("SESSION_SECRET is too short, using a random session key");
            Key::generate()
        }
        None => {
            tracing::warn!("SESSION_SECRET not set, using a random session key");
            Key::generate()
        }
    }
}

/// Resolves the signed session cookie to a user id and stores it as a request
/// extension for the handlers behind it. Unsigned or tampered cookies are 401.
pub async fn auth_middleware(
    Extension(key): Extension<Key>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = cookies.signed(&key).get(SESSION_COOKIE) {
        if let Ok(user_id) = cookie.value().parse::<i32>() {
            tracing::Span::current().record("user_id", user_id);
            request.extensions_mut().insert(user_id);
            return next.run(request).await;
        }
    }
    AppError::Unauthorized.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_cookies::Cookie;

    #[test]
    fn configured_secrets_give_a_stable_key() {
        let secret = "k".repeat(64);
        let a = session_key(Some(&secret));
        let b = session_key(Some(&secret));
        assert_eq!(a.master(), b.master());
    }

    #[test]
    fn signed_cookies_only_verify_under_their_key() {
        let key = session_key(Some(&"k".repeat(64)));
        let other = session_key(None);

        let cookies = Cookies::default();
        cookies.signed(&key).add(Cookie::new(SESSION_COOKIE, "5"));
        let signed = cookies.get(SESSION_COOKIE).unwrap().value().to_string();
        assert_ne!(signed, "5");

        let jar = Cookies::default();
        jar.add(Cookie::new(SESSION_COOKIE, signed));
        assert_eq!(jar.signed(&key).get(SESSION_COOKIE).unwrap().value(), "5");
        assert!(jar.signed(&other).get(SESSION_COOKIE).is_none());

        let forged = Cookies::default();
        forged.add(Cookie::new(SESSION_COOKIE, "5"));
        assert!(forged.signed(&key).get(SESSION_COOKIE).is_none());
    }
}
