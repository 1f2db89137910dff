//! Client for the library API behind the proxy.
//!
//! Every call is one round trip: no retries, no timeout beyond reqwest's
//! default, no caching.

use axum::http::StatusCode;
use reqwest::{header, Method, RequestBuilder};
use serde_json::{json, Value};
use url::Url;

use super::auth::AuthToken;
use crate::domain::ProxyError;
use crate::models::{BorrowDuration, LoginRequest, RegisterRequest};

/// Query accepted by the listing route; empty values are not forwarded.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct BookQuery {
    pub genre: Option<String>,
    pub available_only: Option<String>,
    pub search: Option<String>,
}

impl BookQuery {
    fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("genre", self.genre.as_deref()),
            ("available_only", self.available_only.as_deref()),
            ("search", self.search.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.filter(|v| !v.is_empty()).map(|v| (k, v)))
    }
}

/// Status and decoded JSON body of a backend call.
#[derive(Debug)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Non-success statuses become `ProxyError::Upstream` with the body intact.
    pub fn into_result(self) -> Result<BackendResponse, ProxyError> {
        if self.is_success() {
            Ok(self)
        } else {
            tracing::warn!("Backend answered {}: {}", self.status, self.body);
            Err(ProxyError::upstream(self.status.as_u16(), self.body))
        }
    }
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProxyError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, url: Url, token: Option<&AuthToken>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json");
        match token {
            Some(token) => builder.header(header::AUTHORIZATION, token.bearer()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<BackendResponse, ProxyError> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        // Error pages are often plain text or HTML; only a success must be JSON
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(_) if !status.is_success() => Value::String(text),
                Err(e) => {
                    return Err(ProxyError::Transport(format!(
                        "backend sent invalid JSON ({}): {}",
                        status, e
                    )));
                }
            }
        };

        tracing::debug!("Backend responded {}", status);
        Ok(BackendResponse { status, body })
    }

    pub async fn list_books(
        &self,
        token: &AuthToken,
        query: &BookQuery,
    ) -> Result<BackendResponse, ProxyError> {
        let mut url = self.endpoint("books/list/books/")?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.pairs() {
                pairs.append_pair(key, value);
            }
        }
        // query_pairs_mut leaves a bare '?' behind when nothing was appended
        if url.query() == Some("") {
            url.set_query(None);
        }

        self.send(self.request(Method::GET, url, Some(token))).await
    }

    pub async fn borrow(
        &self,
        token: &AuthToken,
        book_id: i64,
        duration: BorrowDuration,
    ) -> Result<BackendResponse, ProxyError> {
        let url = self.endpoint(&format!("books/book_actions/{}/", book_id))?;
        let builder = self
            .request(Method::POST, url, Some(token))
            .json(&json!({ "duration": duration.days() }));
        self.send(builder).await
    }

    pub async fn borrowed_books(&self, token: &AuthToken) -> Result<BackendResponse, ProxyError> {
        let url = self.endpoint("books/book_actions/borrowed/")?;
        self.send(self.request(Method::GET, url, Some(token))).await
    }

    pub async fn return_book(
        &self,
        token: &AuthToken,
        book_id: i64,
    ) -> Result<BackendResponse, ProxyError> {
        let url = self.endpoint(&format!("books/book_actions/{}/return/", book_id))?;
        self.send(self.request(Method::POST, url, Some(token))).await
    }

    pub async fn recommend(&self, token: &AuthToken) -> Result<BackendResponse, ProxyError> {
        let url = self.endpoint("books/recommend_books/")?;
        self.send(self.request(Method::GET, url, Some(token))).await
    }

    pub async fn submit_review(
        &self,
        token: &AuthToken,
        book_id: i64,
        rating: u8,
        comment: &str,
    ) -> Result<BackendResponse, ProxyError> {
        let url = self.endpoint(&format!("books/book_actions/{}/submit_review/", book_id))?;
        let builder = self
            .request(Method::POST, url, Some(token))
            .json(&json!({ "rating": rating, "comment": comment }));
        self.send(builder).await
    }

    pub async fn reviews(
        &self,
        token: &AuthToken,
        book_id: i64,
    ) -> Result<BackendResponse, ProxyError> {
        let url = self.endpoint(&format!("books/book_actions/{}/reviews/", book_id))?;
        self.send(self.request(Method::GET, url, Some(token))).await
    }

    /// Exchange credentials for an access token.
    ///
    /// Any failure, transport included, is reported as invalid credentials,
    /// carrying the backend's `detail` message when it sent one.
    pub async fn issue_token(&self, credentials: &LoginRequest) -> Result<String, ProxyError> {
        let url = self.endpoint("api/token/")?;
        let builder = self.request(Method::POST, url, None).json(credentials);

        let response = match self.send(builder).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Login error: {}", e);
                return Err(ProxyError::InvalidCredentials("Invalid credentials".to_string()));
            }
        };

        if !response.is_success() {
            tracing::error!("Login error: {} {}", response.status, response.body);
            let message = response
                .body
                .get("detail")
                .and_then(Value::as_str)
                .filter(|d| !d.is_empty())
                .unwrap_or("Invalid credentials");
            return Err(ProxyError::InvalidCredentials(message.to_string()));
        }

        response
            .body
            .get("access")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| {
                tracing::error!("Login error: token response without 'access'");
                ProxyError::InvalidCredentials("Invalid credentials".to_string())
            })
    }

    pub async fn register(&self, form: &RegisterRequest) -> Result<BackendResponse, ProxyError> {
        let url = self.endpoint("books/api/register/")?;
        self.send(self.request(Method::POST, url, None).json(form)).await
    }
}
