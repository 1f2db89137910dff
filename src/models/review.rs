use chrono::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MAX_RATING: u8 = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    #[serde(default)]
    pub user: Option<String>,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub created_at: String,
}

impl Review {
    pub fn reviewer(&self) -> &str {
        match self.user.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Anonymous",
        }
    }

    pub fn stars(&self) -> String {
        render_stars(self.rating)
    }

    /// Calendar date of `created_at`; the raw value when it isn't RFC 3339.
    pub fn display_date(&self) -> String {
        DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

/// Filled stars for the rating, hollow ones up to five.
pub fn render_stars(rating: u8) -> String {
    let filled = rating.min(MAX_RATING) as usize;
    "★".repeat(filled) + &"☆".repeat(MAX_RATING as usize - filled)
}

/// Review form as posted to `/api/reviews`. Every field is optional on the
/// wire so that a missing one is a 400, not a decode failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct NewReview {
    #[serde(rename = "bookId", default)]
    pub book_id: Option<i64>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewReview {
    pub fn new(book_id: i64, rating: u8, comment: impl Into<String>) -> Self {
        Self {
            book_id: Some(book_id),
            rating: Some(rating),
            comment: Some(comment.into()),
        }
    }

    /// `(book_id, rating, comment)` when all three are present and non-zero.
    pub fn complete(&self) -> Option<(i64, u8, &str)> {
        let book_id = self.book_id.filter(|id| *id != 0)?;
        let rating = self.rating.filter(|r| *r != 0)?;
        let comment = self.comment.as_deref().filter(|c| !c.is_empty())?;
        Some((book_id, rating, comment))
    }
}
