//! Client core for the PageTurner catalog API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the reader's
//! favorites in a durable local slot.
//!
//! # Design
//! - `BookstoreClient` is stateless; it holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.
//! - `FavoritesContext` owns its `FavoritesStore`; presentation code reads
//!   and toggles favorites only through the context.

pub mod client;
pub mod context;
pub mod error;
pub mod favorites;
pub mod http;
pub mod query;
pub mod types;

pub use client::BookstoreClient;
pub use context::FavoritesContext;
pub use error::{ApiError, FavoritesError};
pub use favorites::{FavoriteSet, FavoritesStore, FileSlot, MemorySlot, Slot, Toggle, FAVORITES_KEY};
pub use http::{HttpRequest, HttpResponse};
pub use query::{BookQuery, SortKey};
pub use types::{Book, Category};
