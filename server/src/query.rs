//! Book query engine: exclude, filter, sort, limit.
//!
//! # Design
//! `query` runs its stages in a fixed order, each over the survivors of the
//! previous one: exclude, category, search, featured, sort, limit. Sorting is
//! stable, so books with equal keys keep their catalog order.
//!
//! Raw query-string parameters arrive as `BookListParams`, built from the
//! decoded key/value pairs; a repeated key keeps its first value. The HTTP layer
//! coerces them leniently (unknown values fall back to defaults); the
//! command-line runner parses them strictly and reports the offending option.
//! Once a `QueryOptions` exists the engine itself cannot fail.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use icu_collator::{Collator, CollatorOptions};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::Book;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid value {value:?} for option `{option}`")]
    InvalidOption { option: &'static str, value: String },
}

/// Sort order for book listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Descending popularity.
    #[default]
    Popularity,
    /// Descending release year; books without one sort last.
    Newest,
    /// Descending rating.
    Rating,
    /// Ascending title.
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

    fn compare(self, collator: Option<&Collator>, a: &Book, b: &Book) -> Ordering {
        match self {
            SortKey::Popularity => b.popularity.cmp(&a.popularity),
            SortKey::Newest => b.release_year.unwrap_or(0).cmp(&a.release_year.unwrap_or(0)),
            SortKey::Rating => b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal),
            SortKey::Title => compare_titles(collator, &a.title, &b.title),
        }
    }
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(SortKey::Popularity),
            "newest" => Ok(SortKey::Newest),
            "rating" => Ok(SortKey::Rating),
            "title" => Ok(SortKey::Title),
            other => Err(QueryError::InvalidOption {
                option: "sort",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root-locale collator for title ordering, so "Émile" sorts with the E's.
fn title_collator() -> Option<Collator> {
    Collator::try_new(&Default::default(), CollatorOptions::new())
        .map_err(|err| warn!(%err, "title collator unavailable, comparing case-insensitively"))
        .ok()
}

/// Collation order first, raw comparison as the tie-breaker, so titles the
/// collator considers equal are still totally ordered.
fn compare_titles(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    let primary = match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    };
    primary.then_with(|| a.cmp(b))
}

/// Filter, sort and limit options for a single query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Retain books whose category is one of these ids.
    pub categories: Option<Vec<String>>,
    /// Case-insensitive substring over title, author, description, category id.
    pub search: Option<String>,
    pub sort: SortKey,
    pub featured: bool,
    /// Zero or negative means no limit.
    pub limit: Option<i64>,
    pub exclude: Option<String>,
}

/// Run a query over `books`, returning matches in result order.
pub fn query<'a>(books: &'a [Book], options: &QueryOptions) -> Vec<&'a Book> {
    let needle = options.search.as_deref().map(str::to_lowercase);

    let mut results: Vec<&Book> = books
        .iter()
        .filter(|book| options.exclude.as_deref() != Some(book.id.as_str()))
        .filter(|book| match &options.categories {
            Some(categories) => categories.iter().any(|c| *c == book.category_id),
            None => true,
        })
        .filter(|book| match &needle {
            Some(needle) => matches_search(book, needle),
            None => true,
        })
        .filter(|book| !options.featured || book.featured)
        .collect();

    let collator = match options.sort {
        SortKey::Title => title_collator(),
        _ => None,
    };
    // `sort_by` is stable; equal keys keep catalog order.
    results.sort_by(|a, b| options.sort.compare(collator.as_ref(), a, b));

    if let Some(limit) = options.limit.filter(|&n| n > 0) {
        results.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    }

    debug!(
        sort = %options.sort,
        candidates = books.len(),
        returned = results.len(),
        "book query"
    );
    results
}

fn matches_search(book: &Book, needle: &str) -> bool {
    [&book.title, &book.author, &book.description, &book.category_id]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Raw `/api/books` query-string parameters.
#[derive(Debug, Clone, Default)]
pub struct BookListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub featured: Option<String>,
    pub limit: Option<String>,
    pub exclude: Option<String>,
}

/// Collect decoded query-string pairs. Unknown keys are ignored and a
/// repeated key keeps its first value.
impl FromIterator<(String, String)> for BookListParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = BookListParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "category" => &mut params.category,
                "search" => &mut params.search,
                "sort" => &mut params.sort,
                "featured" => &mut params.featured,
                "limit" => &mut params.limit,
                "exclude" => &mut params.exclude,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

impl BookListParams {
    /// Lenient conversion used by the HTTP layer. Never fails: an unknown
    /// sort falls back to popularity, an unparsable limit means no limit, and
    /// `featured` is set only by the literal `"true"`.
    pub fn coerce(&self) -> QueryOptions {
        QueryOptions {
            categories: non_empty(&self.category).map(split_categories),
            search: non_empty(&self.search).map(str::to_string),
            sort: self
                .sort
                .as_deref()
                .and_then(|s| s.parse::<SortKey>().ok())
                .unwrap_or_default(),
            featured: self.featured.as_deref() == Some("true"),
            limit: self.limit.as_deref().and_then(leading_integer),
            exclude: non_empty(&self.exclude).map(str::to_string),
        }
    }

    /// Strict conversion. Rejects unknown sort keys, non-integer limits and
    /// `featured` values other than `true`/`false`.
    pub fn parse(&self) -> Result<QueryOptions, QueryError> {
        let sort = match self.sort.as_deref() {
            Some(s) => s.parse::<SortKey>()?,
            None => SortKey::default(),
        };

        let featured = match self.featured.as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                return Err(QueryError::InvalidOption {
                    option: "featured",
                    value: other.to_string(),
                })
            }
        };

        let limit = match self.limit.as_deref() {
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| QueryError::InvalidOption {
                option: "limit",
                value: raw.to_string(),
            })?),
            None => None,
        };

        Ok(QueryOptions {
            categories: non_empty(&self.category).map(split_categories),
            search: non_empty(&self.search).map(str::to_string),
            sort,
            featured,
            limit,
            exclude: non_empty(&self.exclude).map(str::to_string),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn split_categories(raw: &str) -> Vec<String> {
    raw.split(',').map(str::to_string).collect()
}

/// Parse the leading integer of `raw`, ignoring leading whitespace and any
/// trailing garbage: `"5"`, `" 5"` and `"5abc"` all give 5. A `0x`/`0X`
/// prefix switches to hexadecimal, so `"0x10"` gives 16.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let negative = trimmed.starts_with('-');
    let unsigned = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    let (digits, radix) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (unsigned, 10),
    };
    let digits_len = digits
        .chars()
        .take_while(|c| c.is_digit(radix))
        .count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = match u64::from_str_radix(&digits[..digits_len], radix) {
        Ok(n) => n,
        // Too many digits: saturate rather than drop the limit.
        Err(_) => u64::MAX,
    };
    let value = if negative {
        0i64.checked_sub_unsigned(magnitude).unwrap_or(i64::MIN)
    } else {
        i64::try_from(magnitude).unwrap_or(i64::MAX)
    };
    Some(value)
}
