//! Catalog page: filterable book grid, borrow dropdown, review modal and the
//! recommendation panel underneath.

use std::sync::Arc;

use super::card::{cards, BookCard};
use super::gateway::{CatalogFilter, LibraryGateway};
use super::recommend::RecommendPanel;
use super::routes::Route;
use super::ClientError;
use crate::models::{Book, BorrowDuration, NewReview, Review};

pub const BORROW_FAILED: &str = "You've already borrowed this book or an error occurred!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewDraft {
    pub book_id: i64,
    /// 0 until a rating is picked
    pub rating: u8,
    pub comment: String,
}

/// Review modal; adding and viewing never show at the same time.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ReviewModal {
    #[default]
    Closed,
    Adding(ReviewDraft),
    Viewing { book_id: i64, reviews: Vec<Review> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The add-review form isn't open
    NoDraft,
    /// Rating or comment missing; nothing was sent
    Incomplete,
    Submitted,
    Redirect(Route),
    Failed,
}

pub struct CatalogView {
    gateway: Arc<dyn LibraryGateway>,
    filter: CatalogFilter,
    books: Vec<Book>,
    recommendations: RecommendPanel,
    loading: bool,
    borrow_dropdown: Option<i64>,
    review_modal: ReviewModal,
    toasts: Vec<String>,
}

impl CatalogView {
    pub fn new(gateway: Arc<dyn LibraryGateway>) -> Self {
        Self {
            gateway,
            filter: CatalogFilter::default(),
            books: Vec::new(),
            recommendations: RecommendPanel::default(),
            loading: true,
            borrow_dropdown: None,
            review_modal: ReviewModal::Closed,
            toasts: Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    // Filter setters only record the selection; call `load` afterwards to
    // query the server with it.

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.filter.genre = genre.into();
    }

    pub fn set_author_filter(&mut self, author: impl Into<String>) {
        self.filter.author = author.into();
    }

    pub fn set_available_only(&mut self, available_only: bool) {
        self.filter.available_only = available_only;
    }

    /// Books as loaded from the server.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Loaded books with the filters applied again locally. The server was
    /// already asked to filter; the second pass is kept on purpose.
    pub fn visible_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| self.filter.matches(b)).collect()
    }

    pub fn cards(&self) -> Vec<BookCard> {
        let visible: Vec<Book> = self.visible_books().into_iter().cloned().collect();
        cards(&visible)
    }

    pub fn recommendations(&self) -> &RecommendPanel {
        &self.recommendations
    }

    pub fn recommendations_mut(&mut self) -> &mut RecommendPanel {
        &mut self.recommendations
    }

    /// Fetch the listing with the current filters, then recommendations.
    pub async fn load(&mut self) -> Option<Route> {
        let route = self.fetch().await;
        self.loading = false;
        route
    }

    async fn fetch(&mut self) -> Option<Route> {
        match self.gateway.list_books(&self.filter).await {
            Ok(books) => self.books = books,
            Err(e) => return fetch_failed("Error fetching data", e),
        }

        match self.gateway.recommend().await {
            Ok(books) => self.recommendations.set_books(books),
            Err(e) => return fetch_failed("Error fetching recommendations", e),
        }

        None
    }

    pub fn borrow_dropdown(&self) -> Option<i64> {
        self.borrow_dropdown
    }

    /// Open the duration dropdown for a listed book. A book with no copy
    /// left has its control disabled, so nothing opens.
    pub fn open_borrow(&mut self, book_id: i64) -> bool {
        match self.books.iter().find(|b| b.id == book_id) {
            Some(book) if book.is_available() => {
                self.borrow_dropdown = Some(book_id);
                true
            }
            _ => false,
        }
    }

    pub fn cancel_borrow(&mut self) {
        self.borrow_dropdown = None;
    }

    /// Borrow and merge the response over the listed record, without
    /// refetching. Failures end up as a toast.
    pub async fn borrow(&mut self, book_id: i64, duration: BorrowDuration) -> Option<Route> {
        let unavailable = self
            .books
            .iter()
            .chain(self.recommendations.books())
            .find(|b| b.id == book_id)
            .is_some_and(|b| !b.is_available());
        if unavailable {
            tracing::debug!("Book {} has no copy left, not borrowing", book_id);
            self.borrow_dropdown = None;
            return None;
        }

        let result = self.gateway.borrow(book_id, duration).await;
        self.borrow_dropdown = None;

        match result {
            Ok(patch) => {
                if let Some(book) = self.books.iter_mut().find(|b| b.id == book_id) {
                    match book.merged_with(&patch) {
                        Ok(merged) => *book = merged,
                        Err(e) => {
                            tracing::warn!("Could not merge borrow result for {}: {}", book_id, e)
                        }
                    }
                }
                None
            }
            Err(e) if e.is_unauthorized() => Some(Route::Login),
            Err(e) => {
                tracing::error!("Error borrowing book: {}", e);
                self.toasts.push(BORROW_FAILED.to_string());
                None
            }
        }
    }

    /// Borrow through the recommendation panel's dropdown.
    pub async fn borrow_recommended(
        &mut self,
        book_id: i64,
        duration: BorrowDuration,
    ) -> Option<Route> {
        let (book_id, duration) = self.recommendations.select_duration(book_id, duration)?;
        self.borrow(book_id, duration).await
    }

    pub fn review_modal(&self) -> &ReviewModal {
        &self.review_modal
    }

    pub fn start_review(&mut self, book_id: i64) {
        self.review_modal = ReviewModal::Adding(ReviewDraft {
            book_id,
            rating: 0,
            comment: String::new(),
        });
    }

    pub fn set_rating(&mut self, rating: u8) {
        if let ReviewModal::Adding(draft) = &mut self.review_modal {
            draft.rating = rating;
        }
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        if let ReviewModal::Adding(draft) = &mut self.review_modal {
            draft.comment = comment.into();
        }
    }

    pub fn cancel_review(&mut self) {
        if matches!(self.review_modal, ReviewModal::Adding(_)) {
            self.review_modal = ReviewModal::Closed;
        }
    }

    /// Post the open draft, then show the book's refreshed reviews.
    pub async fn submit_review(&mut self) -> ReviewOutcome {
        let draft = match &self.review_modal {
            ReviewModal::Adding(draft) => draft.clone(),
            _ => return ReviewOutcome::NoDraft,
        };

        let review = NewReview::new(draft.book_id, draft.rating, draft.comment);
        if review.complete().is_none() {
            return ReviewOutcome::Incomplete;
        }

        match self.gateway.submit_review(&review).await {
            Ok(_) => {
                self.review_modal = ReviewModal::Closed;
                match self.view_reviews(draft.book_id).await {
                    Some(route) => ReviewOutcome::Redirect(route),
                    None => ReviewOutcome::Submitted,
                }
            }
            Err(e) if e.is_unauthorized() => ReviewOutcome::Redirect(Route::Login),
            Err(e) => {
                tracing::error!("Error submitting review: {}", e);
                ReviewOutcome::Failed
            }
        }
    }

    pub async fn view_reviews(&mut self, book_id: i64) -> Option<Route> {
        match self.gateway.reviews(book_id).await {
            Ok(reviews) => {
                self.review_modal = ReviewModal::Viewing { book_id, reviews };
                None
            }
            Err(e) => fetch_failed("Error fetching reviews", e),
        }
    }

    pub fn close_reviews(&mut self) {
        if matches!(self.review_modal, ReviewModal::Viewing { .. }) {
            self.review_modal = ReviewModal::Closed;
        }
    }

    pub fn toasts(&self) -> &[String] {
        &self.toasts
    }

    pub fn take_toasts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.toasts)
    }
}

/// 401 sends the user to the login page; anything else is only logged.
pub(crate) fn fetch_failed(context: &str, e: ClientError) -> Option<Route> {
    if e.is_unauthorized() {
        return Some(Route::Login);
    }
    tracing::error!("{}: {}", context, e);
    None
}
