//! Token store backed by the `auth-token` cookie.
//!
//! The bearer token is opaque to us: we never decode or verify it, we only
//! check that it is present and forward it to the backend.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration;

use super::config::Config;
use crate::domain::ProxyError;

pub const TOKEN_NAME: &str = "auth-token";
pub const TOKEN_MAX_AGE_DAYS: i64 = 30;

/// Attributes applied to the token cookie.
#[derive(Clone, Copy, Debug)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookiePolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            secure: config.production,
            same_site: config.cookie_same_site,
        }
    }
}

pub fn set_token(jar: CookieJar, value: impl Into<String>, policy: CookiePolicy) -> CookieJar {
    let cookie = Cookie::build((TOKEN_NAME, value.into()))
        .http_only(true)
        .same_site(policy.same_site)
        .secure(policy.secure)
        .max_age(Duration::days(TOKEN_MAX_AGE_DAYS))
        .path("/");
    tracing::debug!("Token cookie set (secure: {})", policy.secure);
    jar.add(cookie)
}

pub fn get_token(jar: &CookieJar) -> Option<String> {
    jar.get(TOKEN_NAME)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

pub fn delete_tokens(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(TOKEN_NAME).path("/"))
}

/// Bearer token taken from the request cookies.
///
/// Rejects with 401 and a `/login` redirect hint when the cookie is missing.
#[derive(Debug, Clone)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthToken
where
    S: Send + Sync,
{
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match get_token(&jar) {
            Some(token) => Ok(AuthToken(token)),
            None => {
                tracing::debug!("No {} cookie on {}", TOKEN_NAME, parts.uri.path());
                Err(ProxyError::MissingAuth)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    fn policy() -> CookiePolicy {
        CookiePolicy {
            secure: true,
            same_site: SameSite::Strict,
        }
    }

    #[test]
    fn test_set_token_attributes() {
        let jar = set_token(CookieJar::new(), "abc.def", policy());
        let cookie = jar.get(TOKEN_NAME).expect("cookie should be in the jar");

        assert_eq!(cookie.value(), "abc.def");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
    }

    #[test]
    fn test_get_token_from_request_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; auth-token=xyz"),
        );
        let jar = CookieJar::from_headers(&headers);
        assert_eq!(get_token(&jar), Some("xyz".to_string()));

        let jar = delete_tokens(jar);
        assert_eq!(get_token(&jar), None);
    }

    #[test]
    fn test_empty_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("auth-token="));
        assert_eq!(get_token(&CookieJar::from_headers(&headers)), None);
    }
}
