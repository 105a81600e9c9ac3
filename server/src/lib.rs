//! Read-only JSON API over the in-memory book catalog.
//!
//! Five GET endpoints under `/api`. The catalog is built once before the
//! router and shared as `Arc<Catalog>`; handlers never write to it.

pub mod catalog;
pub mod config;
pub mod query;

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::info;

pub use catalog::{Book, Catalog, CatalogError, Category};
pub use query::{BookListParams, QueryError, QueryOptions, SortKey};

pub type SharedCatalog = Arc<Catalog>;

/// Handler errors. Anything unexpected surfaces as a caught panic and is
/// answered by `internal_error`.
#[derive(Debug)]
pub enum AppError {
    NotFound(&'static str),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("{what} not found") })),
            )
                .into_response(),
        }
    }
}

fn internal_error(_panic: Box<dyn Any + Send + 'static>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

pub fn app(catalog: SharedCatalog) -> Router {
    Router::new()
        .route("/api/categories", get(list_categories))
        .route("/api/categories/{id}", get(get_category))
        .route("/api/books", get(list_books))
        .route("/api/books/featured", get(list_featured_books))
        .route("/api/books/{id}", get(get_book))
        .layer(CatchPanicLayer::custom(internal_error))
        .layer(TraceLayer::new_for_http())
        .with_state(catalog)
}

pub async fn run(listener: TcpListener, catalog: SharedCatalog) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(
            %addr,
            books = catalog.books().len(),
            categories = catalog.categories().len(),
            "serving catalog"
        );
    }
    axum::serve(listener, app(catalog)).await
}

async fn list_categories(State(catalog): State<SharedCatalog>) -> Json<Vec<Category>> {
    Json(catalog.categories().to_vec())
}

async fn get_category(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> Result<Json<Category>, AppError> {
    catalog
        .category(&id)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound("Category"))
}

async fn list_books(
    State(catalog): State<SharedCatalog>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Vec<Book>> {
    let options = pairs.into_iter().collect::<BookListParams>().coerce();
    Json(catalog.query(&options).into_iter().cloned().collect())
}

async fn list_featured_books(State(catalog): State<SharedCatalog>) -> Json<Vec<Book>> {
    Json(catalog.featured_books().into_iter().cloned().collect())
}

async fn get_book(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> Result<Json<Book>, AppError> {
    catalog
        .book(&id)
        .cloned()
        .map(Json)
        .ok_or(AppError::NotFound("Book"))
}
