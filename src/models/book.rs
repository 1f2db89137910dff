use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// Catalog entry as returned by the backend.
///
/// `available_copies <= total_copies` is the backend's invariant; nothing on
/// this side checks it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: Author,
    pub genre: String,
    pub total_copies: i64,
    pub available_copies: i64,
    #[serde(default)]
    pub read_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Fields the backend sends that we don't model (kept across merges)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    /// Overlay `patch` on this record, field by field, the way a borrow
    /// response updates the row it came from.
    pub fn merged_with(&self, patch: &Map<String, Value>) -> Result<Book, serde_json::Error> {
        let mut fields = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
        serde_json::from_value(Value::Object(fields))
    }
}

/// Genre codes understood by the backend. The empty code means "all genres".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Genre {
    Fiction,
    NonFiction,
    Mystery,
    ScienceFiction,
    Fantasy,
    Biography,
    History,
    Romance,
    Thriller,
    SelfHelp,
}

impl Genre {
    pub const ALL: [Genre; 10] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Biography,
        Genre::History,
        Genre::Romance,
        Genre::Thriller,
        Genre::SelfHelp,
    ];

    pub const ALL_LABEL: &'static str = "All Genres";

    pub fn code(self) -> &'static str {
        match self {
            Genre::Fiction => "FI",
            Genre::NonFiction => "NF",
            Genre::Mystery => "MY",
            Genre::ScienceFiction => "SF",
            Genre::Fantasy => "FA",
            Genre::Biography => "BI",
            Genre::History => "HI",
            Genre::Romance => "RO",
            Genre::Thriller => "TH",
            Genre::SelfHelp => "SH",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Mystery => "Mystery",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Biography => "Biography",
            Genre::History => "History",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::SelfHelp => "Self-Help",
        }
    }

    pub fn from_code(code: &str) -> Option<Genre> {
        Genre::ALL.into_iter().find(|g| g.code() == code)
    }
}

/// Label shown on a card; unknown codes show nothing.
pub fn genre_label(code: &str) -> Option<&'static str> {
    Genre::from_code(code).map(Genre::label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Book {
        serde_json::from_value(json!({
            "id": 5,
            "title": "The Hound of the Baskervilles",
            "author": { "id": 2, "name": "Arthur Conan Doyle" },
            "genre": "MY",
            "total_copies": 4,
            "available_copies": 2,
            "read_count": 17,
            "shelf": "B3"
        }))
        .unwrap()
    }

    #[test]
    fn test_unknown_fields_survive_deserialization() {
        let book = sample();
        assert_eq!(book.extra.get("shelf"), Some(&json!("B3")));
        assert_eq!(book.cover_image, None);
    }

    #[test]
    fn test_merge_overrides_only_patched_fields() {
        let book = sample();
        let patch = json!({ "available_copies": 1, "message": "Borrowed for 3 days" });
        let merged = book.merged_with(patch.as_object().unwrap()).unwrap();

        assert_eq!(merged.available_copies, 1);
        assert_eq!(merged.total_copies, 4);
        assert_eq!(merged.title, book.title);
        assert_eq!(merged.extra.get("message"), Some(&json!("Borrowed for 3 days")));
    }

    #[test]
    fn test_merge_rejects_mistyped_patch() {
        let patch = json!({ "available_copies": "many" });
        assert!(sample().merged_with(patch.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_genre_codes() {
        assert_eq!(genre_label("MY"), Some("Mystery"));
        assert_eq!(genre_label("SH"), Some("Self-Help"));
        assert_eq!(genre_label("XX"), None);
        assert_eq!(genre_label(""), None);
    }
}
