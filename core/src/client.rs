//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `BookstoreClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::BookQuery;
use crate::types::{Book, Category};

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct BookstoreClient {
    base_url: String,
}

impl BookstoreClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_categories(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/api/categories", self.base_url))
    }

    pub fn build_get_category(&self, id: &str) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/api/categories/{}",
            self.base_url,
            urlencoding::encode(id)
        ))
    }

    pub fn build_list_books(&self, query: &BookQuery) -> HttpRequest {
        let query_string = query.to_query_string();
        if query_string.is_empty() {
            HttpRequest::get(format!("{}/api/books", self.base_url))
        } else {
            HttpRequest::get(format!("{}/api/books?{query_string}", self.base_url))
        }
    }

    pub fn build_get_book(&self, id: &str) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/api/books/{}",
            self.base_url,
            urlencoding::encode(id)
        ))
    }

    pub fn build_list_featured_books(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/api/books/featured", self.base_url))
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<Category>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_book(&self, response: HttpResponse) -> Result<Book, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_featured_books(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        parse_json(response)
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
