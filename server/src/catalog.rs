//! In-memory book and category catalog.
//!
//! # Design
//! The catalog is loaded once at startup and never mutated afterwards, so it
//! is shared across requests behind a plain `Arc` with no lock. Books and
//! categories are kept in load order alongside an id index; that order is the
//! tie-breaker for every sort the query engine performs.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::{self, QueryOptions};

/// Seed data bundled with the server.
const SEED_CATALOG: &str = include_str!("../data/catalog.json");

/// A catalog item with descriptive and ranking metadata.
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
    /// Preview text, pages separated by `---PAGE---`.
    #[serde(default)]
    pub preview_content: Option<String>,
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

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate book id: {0}")]
    DuplicateBook(String),

    #[error("duplicate category id: {0}")]
    DuplicateCategory(String),
}

#[derive(Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
    books: Vec<Book>,
}

/// Read-only, insertion-ordered store of books and categories.
#[derive(Debug, Default)]
pub struct Catalog {
    books: Vec<Book>,
    book_index: HashMap<String, usize>,
    categories: Vec<Category>,
    category_index: HashMap<String, usize>,
}

impl Catalog {
    /// Catalog built from the bundled seed data.
    pub fn seeded() -> Result<Self, CatalogError> {
        Self::from_json(SEED_CATALOG)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a catalog document of the form `{"categories": [...], "books": [...]}`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.categories, file.books)
    }

    pub fn new(categories: Vec<Category>, books: Vec<Book>) -> Result<Self, CatalogError> {
        let mut category_index = HashMap::with_capacity(categories.len());
        for (pos, category) in categories.iter().enumerate() {
            if category_index.insert(category.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut book_index = HashMap::with_capacity(books.len());
        for (pos, book) in books.iter().enumerate() {
            if book_index.insert(book.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateBook(book.id.clone()));
            }
        }

        Ok(Self {
            books,
            book_index,
            categories,
            category_index,
        })
    }

    /// All books in load order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.book_index.get(id).map(|&pos| &self.books[pos])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.category_index.get(id).map(|&pos| &self.categories[pos])
    }

    /// Featured books in load order. No sort is applied.
    pub fn featured_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|book| book.featured).collect()
    }

    pub fn query(&self, options: &QueryOptions) -> Vec<&Book> {
        query::query(&self.books, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_loads_all_records() {
        let catalog = Catalog::seeded().unwrap();
        assert_eq!(catalog.categories().len(), 5);
        assert_eq!(catalog.books().len(), 15);
        assert_eq!(catalog.books()[0].id, "book-1");
        assert_eq!(catalog.books()[14].id, "book-15");
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::seeded().unwrap();
        let hobbit = catalog.book("book-8").unwrap();
        assert_eq!(hobbit.title, "The Hobbit");
        assert_eq!(hobbit.category_id, "fantasy");
        assert_eq!(hobbit.popularity, 167_000);
        assert_eq!(catalog.category("fantasy").unwrap().name, "Fantasy");
        assert!(catalog.book("book-99").is_none());
        assert!(catalog.category("poetry").is_none());
    }

    #[test]
    fn featured_books_keep_load_order() {
        let catalog = Catalog::seeded().unwrap();
        let ids: Vec<&str> = catalog.featured_books().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["book-1", "book-2", "book-3", "book-4", "book-5"]);
    }

    #[test]
    fn missing_ranking_fields_default_to_zero() {
        let json = r#"{
            "categories": [],
            "books": [{
                "id": "b",
                "title": "Bare",
                "author": "Anon",
                "description": "",
                "coverUrl": "",
                "categoryId": "misc"
            }]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        let book = catalog.book("b").unwrap();
        assert_eq!(book.rating, 0.0);
        assert_eq!(book.review_count, 0);
        assert_eq!(book.popularity, 0);
        assert_eq!(book.release_year, None);
        assert!(!book.featured);
        assert!(book.preview_content.is_none());
    }

    #[test]
    fn duplicate_book_id_is_rejected() {
        let json = r#"{
            "categories": [],
            "books": [
                {"id": "x", "title": "A", "author": "", "description": "", "coverUrl": "", "categoryId": "c"},
                {"id": "x", "title": "B", "author": "", "description": "", "coverUrl": "", "categoryId": "c"}
            ]
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateBook(id) if id == "x"));
    }

    #[test]
    fn duplicate_category_id_is_rejected() {
        let json = r#"{
            "categories": [
                {"id": "c", "name": "One"},
                {"id": "c", "name": "Two"}
            ],
            "books": []
        }"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategory(id) if id == "c"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Catalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{"categories": [{"id": "c", "name": "C"}], "books": []}"#).unwrap();
        let catalog = Catalog::from_path(&path).unwrap();
        assert_eq!(catalog.categories().len(), 1);

        let err = Catalog::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }

    #[test]
    fn book_serializes_in_camel_case() {
        let catalog = Catalog::seeded().unwrap();
        let json = serde_json::to_value(catalog.book("book-1").unwrap()).unwrap();
        assert_eq!(json["categoryId"], "fiction");
        assert_eq!(json["releaseYear"], 2020);
        assert_eq!(json["reviewCount"], 12453);
        assert_eq!(json["featured"], true);
        assert!(json["previewContent"].as_str().unwrap().contains("---PAGE---"));
    }
}
