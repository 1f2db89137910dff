use crate::models::book::{genre_label, Book};

pub const NO_IMAGE: &str = "No Image Available";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cover {
    Image(String),
    Placeholder,
}

/// Display row for one book in a grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookCard {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: Option<&'static str>,
    pub availability: String,
    pub views: String,
    pub cover: Cover,
    /// Borrow control is disabled when no copy is left
    pub borrow_enabled: bool,
}

impl From<&Book> for BookCard {
    fn from(book: &Book) -> Self {
        let cover = match book.cover_image.as_deref() {
            Some(url) if !url.is_empty() => Cover::Image(url.to_owned()),
            _ => Cover::Placeholder,
        };

        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.name.clone(),
            genre: genre_label(&book.genre),
            availability: format!(
                "Available: {} of {}",
                book.available_copies, book.total_copies
            ),
            views: format!("Views: {}", book.read_count),
            cover,
            borrow_enabled: book.is_available(),
        }
    }
}

pub fn cards(books: &[Book]) -> Vec<BookCard> {
    books.iter().map(BookCard::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::book;

    #[test]
    fn test_card_for_available_book() {
        let mut b = book(4, "MY", "Christie", 2, 3);
        b.read_count = 12;
        b.cover_image = Some("https://covers.example/4.jpg".to_string());

        let card = BookCard::from(&b);
        assert_eq!(card.genre, Some("Mystery"));
        assert_eq!(card.author, "Christie");
        assert_eq!(card.availability, "Available: 2 of 3");
        assert_eq!(card.views, "Views: 12");
        assert_eq!(card.cover, Cover::Image("https://covers.example/4.jpg".to_string()));
        assert!(card.borrow_enabled);
    }

    #[test]
    fn test_card_without_cover_or_copies() {
        let mut b = book(5, "XX", "Nobody", 0, 1);
        b.cover_image = Some(String::new());

        let card = BookCard::from(&b);
        assert_eq!(card.cover, Cover::Placeholder);
        assert_eq!(card.genre, None);
        assert!(!card.borrow_enabled);
    }
}
