//! In-memory gateway for view-model tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::gateway::{CatalogFilter, LibraryGateway};
use super::ClientError;
use crate::models::{Book, BorrowDuration, LoginRequest, NewReview, RegisterRequest, Review};

pub(crate) fn book(id: i64, genre: &str, author: &str, available: i64, total: i64) -> Book {
    serde_json::from_value(json!({
        "id": id,
        "title": format!("Book {}", id),
        "author": { "id": id * 10, "name": author },
        "genre": genre,
        "total_copies": total,
        "available_copies": available,
        "read_count": 0
    }))
    .unwrap()
}

pub(crate) fn review(id: i64, rating: u8, comment: &str) -> Review {
    Review {
        id,
        user: None,
        rating,
        comment: comment.to_string(),
        created_at: "2025-01-01T00:00:00Z".to_string(),
    }
}

#[derive(Default)]
pub(crate) struct FakeGateway {
    pub books: Mutex<Vec<Book>>,
    pub recommended: Mutex<Vec<Book>>,
    pub borrowed: Mutex<Vec<Book>>,
    pub reviews: Mutex<Vec<Review>>,
    pub borrow_patch: Mutex<Map<String, Value>>,
    /// Status every call fails with, when set
    pub fail_with: Mutex<Option<u16>>,
    pub authenticated: AtomicBool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn fail_with(&self, status: u16) {
        *self.fail_with.lock().unwrap() = Some(status);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        match *self.fail_with.lock().unwrap() {
            Some(status) => Err(ClientError::Status {
                status,
                body: json!({ "error": format!("failed with {}", status) }),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LibraryGateway for FakeGateway {
    async fn list_books(&self, filter: &CatalogFilter) -> Result<Vec<Book>, ClientError> {
        self.record(format!(
            "list_books genre={} search={} available_only={}",
            filter.genre, filter.author, filter.available_only
        ))?;
        Ok(self.books.lock().unwrap().clone())
    }

    async fn recommend(&self) -> Result<Vec<Book>, ClientError> {
        self.record("recommend".into())?;
        Ok(self.recommended.lock().unwrap().clone())
    }

    async fn borrow(
        &self,
        book_id: i64,
        duration: BorrowDuration,
    ) -> Result<Map<String, Value>, ClientError> {
        self.record(format!("borrow {} {}", book_id, duration.days()))?;
        Ok(self.borrow_patch.lock().unwrap().clone())
    }

    async fn borrowed_books(&self) -> Result<Vec<Book>, ClientError> {
        self.record("borrowed_books".into())?;
        Ok(self.borrowed.lock().unwrap().clone())
    }

    async fn return_book(&self, book_id: i64) -> Result<(), ClientError> {
        self.record(format!("return {}", book_id))
    }

    async fn submit_review(&self, review: &NewReview) -> Result<Value, ClientError> {
        self.record(format!("submit_review {:?}", review.book_id))?;
        Ok(json!({ "id": 1 }))
    }

    async fn reviews(&self, book_id: i64) -> Result<Vec<Review>, ClientError> {
        self.record(format!("reviews {}", book_id))?;
        Ok(self.reviews.lock().unwrap().clone())
    }

    async fn auth_status(&self) -> Result<bool, ClientError> {
        self.record("auth_status".into())?;
        Ok(self.authenticated.load(Ordering::SeqCst))
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.record("logout".into())?;
        self.authenticated.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<(), ClientError> {
        self.record(format!("login {}", credentials.username))?;
        self.authenticated.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn register(&self, form: &RegisterRequest) -> Result<(), ClientError> {
        self.record(format!("register {}", form.username))
    }
}
