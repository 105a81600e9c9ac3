//! Domain DTOs for the catalog API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! so the client never links against Axum. Integration tests catch any schema
//! drift between the two crates.

use serde::{Deserialize, Serialize};

/// Separator between pages of a book's preview text.
pub const PAGE_SEPARATOR: &str = "---PAGE---";

/// A single book returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    pub cover_url: String,
    pub category_id: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub popularity: u64,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub preview_content: Option<String>,
}

impl Book {
    /// Preview text split into reader pages. Empty segments are dropped;
    /// a book without preview content has no pages.
    pub fn preview_pages(&self) -> Vec<&str> {
        match &self.preview_content {
            Some(content) => content
                .split(PAGE_SEPARATOR)
                .filter(|page| !page.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}

/// A named grouping of books.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with_preview(preview: Option<&str>) -> Book {
        Book {
            id: "book-1".to_string(),
            title: "The Midnight Library".to_string(),
            author: "Matt Haig".to_string(),
            description: String::new(),
            synopsis: None,
            cover_url: String::new(),
            category_id: "fiction".to_string(),
            rating: 4.5,
            review_count: 0,
            popularity: 0,
            release_year: Some(2020),
            featured: true,
            preview_content: preview.map(str::to_string),
        }
    }

    #[test]
    fn preview_pages_split_on_separator() {
        let book = book_with_preview(Some("One\n\n---PAGE---\n\nTwo\n\n---PAGE---\n\nThree"));
        assert_eq!(book.preview_pages(), ["One\n\n", "\n\nTwo\n\n", "\n\nThree"]);
    }

    #[test]
    fn preview_pages_drop_empty_segments() {
        let book = book_with_preview(Some("---PAGE---Only---PAGE---"));
        assert_eq!(book.preview_pages(), ["Only"]);
    }

    #[test]
    fn no_preview_means_no_pages() {
        assert!(book_with_preview(None).preview_pages().is_empty());
        assert!(book_with_preview(Some("")).preview_pages().is_empty());
    }

    #[test]
    fn book_deserializes_from_camel_case() {
        let json = r#"{
            "id": "book-8",
            "title": "The Hobbit",
            "author": "J.R.R. Tolkien",
            "description": "Bilbo Baggins is a hobbit.",
            "coverUrl": "https://example.com/hobbit.jpg",
            "categoryId": "fantasy",
            "popularity": 167000,
            "releaseYear": 1937
        }"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.category_id, "fantasy");
        assert_eq!(book.release_year, Some(1937));
        assert_eq!(book.rating, 0.0);
        assert!(!book.featured);
    }

    #[test]
    fn category_optional_fields() {
        let category: Category = serde_json::from_str(r#"{"id":"science","name":"Science"}"#).unwrap();
        assert!(category.description.is_none());
        assert!(category.image_url.is_none());
    }
}
