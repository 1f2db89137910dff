use std::sync::Arc;

use super::card::{cards, BookCard};
use super::catalog::fetch_failed;
use super::gateway::LibraryGateway;
use super::routes::Route;
use crate::models::Book;

pub const NO_BORROWED_BOOKS: &str = "No books borrowed yet.";

/// "My Borrowed Books" page.
pub struct BorrowedShelf {
    gateway: Arc<dyn LibraryGateway>,
    books: Vec<Book>,
    loading: bool,
}

impl BorrowedShelf {
    pub fn new(gateway: Arc<dyn LibraryGateway>) -> Self {
        Self {
            gateway,
            books: Vec::new(),
            loading: true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn cards(&self) -> Vec<BookCard> {
        cards(&self.books)
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.books.is_empty().then_some(NO_BORROWED_BOOKS)
    }

    pub async fn load(&mut self) -> Option<Route> {
        let route = match self.gateway.borrowed_books().await {
            Ok(books) => {
                self.books = books;
                None
            }
            Err(e) => fetch_failed("Error fetching borrowed books", e),
        };
        self.loading = false;
        route
    }

    /// Return a book; it leaves the shelf only once the backend accepted it.
    pub async fn return_book(&mut self, book_id: i64) -> Option<Route> {
        match self.gateway.return_book(book_id).await {
            Ok(()) => {
                self.books.retain(|b| b.id != book_id);
                None
            }
            Err(e) => fetch_failed("Error returning book", e),
        }
    }
}
