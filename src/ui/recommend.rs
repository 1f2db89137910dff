use super::card::{cards, BookCard};
use crate::models::{Book, BorrowDuration};

pub const NO_RECOMMENDATIONS: &str =
    "No recommendations available. Borrow or review a book to get suggestions!";

/// "Recommended Reads" panel with its own borrow dropdown.
///
/// The panel doesn't borrow anything itself: a chosen duration is handed back
/// to the catalog, which owns the request.
#[derive(Debug, Default)]
pub struct RecommendPanel {
    books: Vec<Book>,
    dropdown: Option<i64>,
}

impl RecommendPanel {
    pub fn set_books(&mut self, books: Vec<Book>) {
        self.books = books;
        self.dropdown = None;
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn find(&self, book_id: i64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == book_id)
    }

    pub fn cards(&self) -> Vec<BookCard> {
        cards(&self.books)
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.books.is_empty().then_some(NO_RECOMMENDATIONS)
    }

    /// Open the dropdown for `book_id`; refused when no copy is available.
    pub fn open_borrow(&mut self, book_id: i64) -> bool {
        match self.find(book_id) {
            Some(book) if book.is_available() => {
                self.dropdown = Some(book_id);
                true
            }
            _ => false,
        }
    }

    pub fn cancel_borrow(&mut self) {
        self.dropdown = None;
    }

    pub fn open_dropdown(&self) -> Option<i64> {
        self.dropdown
    }

    /// Pick a duration from the open dropdown; closes it either way.
    pub fn select_duration(
        &mut self,
        book_id: i64,
        duration: BorrowDuration,
    ) -> Option<(i64, BorrowDuration)> {
        let open = self.dropdown.take();
        (open == Some(book_id)).then_some((book_id, duration))
    }
}
