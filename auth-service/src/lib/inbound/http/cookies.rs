use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;
use cookie::time;

use crate::domain::token::models::RefreshToken;

/// Name of the cookie carrying the opaque refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Only the auth endpoints ever receive the refresh cookie.
pub const REFRESH_COOKIE_PATH: &str = "/api/auth";

/// Attributes of the refresh token cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshCookiePolicy {
    /// Set `Secure`; enabled in production
    pub secure: bool,
    /// Cookie lifetime, equal to the refresh token lifetime
    pub max_age: chrono::Duration,
}

impl RefreshCookiePolicy {
    pub fn new(secure: bool, max_age: chrono::Duration) -> Self {
        Self { secure, max_age }
    }

    /// Cookie holding a freshly issued refresh token.
    pub fn issue(&self, token: &RefreshToken) -> Cookie<'static> {
        self.base(token.as_str().to_owned())
            .max_age(time::Duration::seconds(self.max_age.num_seconds()))
            .build()
    }

    /// Empty cookie that makes the browser drop the refresh token.
    pub fn expire(&self) -> Cookie<'static> {
        self.base(String::new())
            .max_age(time::Duration::ZERO)
            .build()
    }

    fn base(&self, value: String) -> cookie::CookieBuilder<'static> {
        Cookie::build((REFRESH_COOKIE, value))
            .http_only(true)
            .same_site(SameSite::Strict)
            .path(REFRESH_COOKIE_PATH)
            .secure(self.secure)
    }
}

/// Refresh token presented by the client, if any. An empty cookie counts as absent.
pub fn presented_refresh_token(jar: &CookieJar) -> Option<RefreshToken> {
    jar.get(REFRESH_COOKIE)
        .map(|c| c.value().trim())
        .filter(|v| !v.is_empty())
        .map(RefreshToken::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(secure: bool) -> RefreshCookiePolicy {
        RefreshCookiePolicy::new(secure, chrono::Duration::days(7))
    }

    #[test]
    fn test_issued_cookie_attributes() {
        let cookie = policy(true).issue(&RefreshToken::new("opaque"));

        assert_eq!(cookie.name(), REFRESH_COOKIE);
        assert_eq!(cookie.value(), "opaque");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some(REFRESH_COOKIE_PATH));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }

    #[test]
    fn test_cookie_not_secure_outside_production() {
        let cookie = policy(false).issue(&RefreshToken::new("opaque"));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn test_expired_cookie_is_empty_with_zero_max_age() {
        let cookie = policy(false).expire();

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert_eq!(cookie.path(), Some(REFRESH_COOKIE_PATH));
    }

    #[test]
    fn test_presented_token_ignores_empty_cookie() {
        let jar = CookieJar::new().add(Cookie::new(REFRESH_COOKIE, ""));
        assert!(presented_refresh_token(&jar).is_none());

        let jar = CookieJar::new().add(Cookie::new(REFRESH_COOKIE, "abc"));
        assert_eq!(
            presented_refresh_token(&jar).map(RefreshToken::into_inner),
            Some("abc".to_string())
        );
    }
}
