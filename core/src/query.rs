//! Typed builder for `/api/books` query strings.

use crate::types::Book;

/// Number of related books shown next to a book's details.
pub const RELATED_LIMIT: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Popularity,
    Newest,
    Rating,
    Title,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Popularity => "popularity",
            SortKey::Newest => "newest",
            SortKey::Rating => "rating",
            SortKey::Title => "title",
        }
    }
}

/// Options for listing books. Unset fields are omitted from the query string
/// and take the server's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub categories: Vec<String>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub featured: bool,
    pub limit: Option<u32>,
    pub exclude: Option<String>,
}

impl BookQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most popular books first.
    pub fn popular(limit: u32) -> Self {
        Self::new().sort(SortKey::Popularity).limit(limit)
    }

    /// Most recently released books first.
    pub fn newest(limit: u32) -> Self {
        Self::new().sort(SortKey::Newest).limit(limit)
    }

    /// Other books from the same category as `book`.
    pub fn related_to(book: &Book) -> Self {
        Self::new()
            .category(&book.category_id)
            .limit(RELATED_LIMIT)
            .exclude(&book.id)
    }

    pub fn category(mut self, id: &str) -> Self {
        self.categories.push(id.to_string());
        self
    }

    pub fn search(mut self, text: &str) -> Self {
        self.search = Some(text.to_string());
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn exclude(mut self, id: &str) -> Self {
        self.exclude = Some(id.to_string());
        self
    }

    /// Encoded query string without the leading `?`. Empty when every option
    /// is unset. Whitespace-only search text is never sent.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        let categories: Vec<&str> = self
            .categories
            .iter()
            .map(String::as_str)
            .filter(|c| !c.is_empty())
            .collect();
        if !categories.is_empty() {
            pairs.push(("category", categories.join(",")));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search", search.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if self.featured {
            pairs.push(("featured", "true".to_string()));
        }
        if let Some(limit) = self.limit.filter(|&n| n > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(exclude) = self.exclude.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("exclude", exclude.to_string()));
        }

        pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
