use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use url::Url;

use super::gateway::{CatalogFilter, LibraryGateway};
use super::ClientError;
use crate::models::{
    AuthStatus, Book, BorrowDuration, BorrowRequest, LoginRequest, NewReview, RegisterRequest,
    Review,
};

/// HTTP gateway to the proxy, holding the `auth-token` cookie like a browser
/// would.
#[derive(Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    origin: Url,
}

impl ProxyClient {
    pub fn new(origin: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            origin: Url::parse(origin)?,
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.origin.join(path)?;
        Ok(self.http.request(method, url))
    }

    async fn checked(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::checked(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(), ClientError> {
        Self::checked(builder.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl LibraryGateway for ProxyClient {
    async fn list_books(&self, filter: &CatalogFilter) -> Result<Vec<Book>, ClientError> {
        let available_only = filter.available_only.to_string();
        let builder = self.request(Method::GET, "/api/list_books")?.query(&[
            ("genre", filter.genre.as_str()),
            ("available_only", available_only.as_str()),
            ("search", filter.author.as_str()),
        ]);
        self.fetch(builder).await
    }

    async fn recommend(&self) -> Result<Vec<Book>, ClientError> {
        self.fetch(self.request(Method::GET, "/api/recommend")?).await
    }

    async fn borrow(
        &self,
        book_id: i64,
        duration: BorrowDuration,
    ) -> Result<Map<String, Value>, ClientError> {
        let builder = self
            .request(Method::POST, &format!("/api/borrow/{}", book_id))?
            .json(&BorrowRequest::from(duration));
        match self.fetch::<Value>(builder).await? {
            Value::Object(fields) => Ok(fields),
            other => {
                tracing::debug!("Borrow returned a non-object body: {}", other);
                Ok(Map::new())
            }
        }
    }

    async fn borrowed_books(&self) -> Result<Vec<Book>, ClientError> {
        self.fetch(self.request(Method::GET, "/api/borrow")?).await
    }

    async fn return_book(&self, book_id: i64) -> Result<(), ClientError> {
        let builder = self
            .request(Method::POST, &format!("/api/return/{}", book_id))?
            .json(&json!({}));
        self.execute(builder).await
    }

    async fn submit_review(&self, review: &NewReview) -> Result<Value, ClientError> {
        let builder = self.request(Method::POST, "/api/reviews")?.json(review);
        self.fetch(builder).await
    }

    async fn reviews(&self, book_id: i64) -> Result<Vec<Review>, ClientError> {
        let builder = self
            .request(Method::GET, "/api/reviews")?
            .query(&[("bookId", book_id)]);
        self.fetch(builder).await
    }

    async fn auth_status(&self) -> Result<bool, ClientError> {
        let status: AuthStatus = self.fetch(self.request(Method::GET, "/api/auth_check")?).await?;
        Ok(status.is_authenticated)
    }

    async fn logout(&self) -> Result<(), ClientError> {
        let builder = self.request(Method::POST, "/api/auth_check")?.json(&json!({}));
        self.execute(builder).await
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<(), ClientError> {
        let builder = self.request(Method::POST, "/api/login")?.json(credentials);
        self.execute(builder).await
    }

    async fn register(&self, form: &RegisterRequest) -> Result<(), ClientError> {
        let builder = self.request(Method::POST, "/api/register")?.json(form);
        self.execute(builder).await
    }
}
