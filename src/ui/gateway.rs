//! Gateway trait between the view models and the proxy routes.
//!
//! `ProxyClient` is the HTTP implementation; tests substitute their own.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::ClientError;
use crate::models::{Book, BorrowDuration, LoginRequest, NewReview, RegisterRequest, Review};

/// Filter selections of the catalog page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Genre code; empty means all genres
    pub genre: String,
    /// Author name substring, matched case-insensitively
    pub author: String,
    pub available_only: bool,
}

impl CatalogFilter {
    pub fn matches(&self, book: &Book) -> bool {
        let genre_match = self.genre.is_empty() || book.genre == self.genre;
        let author_match = self.author.is_empty()
            || book
                .author
                .name
                .to_lowercase()
                .contains(&self.author.to_lowercase());
        let availability_match = !self.available_only || book.available_copies > 0;
        genre_match && author_match && availability_match
    }
}

#[async_trait]
pub trait LibraryGateway: Send + Sync {
    /// `GET /api/list_books` with the filters as query parameters
    async fn list_books(&self, filter: &CatalogFilter) -> Result<Vec<Book>, ClientError>;

    async fn recommend(&self) -> Result<Vec<Book>, ClientError>;

    /// Borrow result as a JSON object, to be merged over the book's row
    async fn borrow(
        &self,
        book_id: i64,
        duration: BorrowDuration,
    ) -> Result<Map<String, Value>, ClientError>;

    async fn borrowed_books(&self) -> Result<Vec<Book>, ClientError>;

    async fn return_book(&self, book_id: i64) -> Result<(), ClientError>;

    async fn submit_review(&self, review: &NewReview) -> Result<Value, ClientError>;

    async fn reviews(&self, book_id: i64) -> Result<Vec<Review>, ClientError>;

    async fn auth_status(&self) -> Result<bool, ClientError>;

    async fn logout(&self) -> Result<(), ClientError>;

    async fn login(&self, credentials: &LoginRequest) -> Result<(), ClientError>;

    async fn register(&self, form: &RegisterRequest) -> Result<(), ClientError>;
}
