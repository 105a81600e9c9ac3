//! Command-line and environment configuration for the server binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::catalog::{Catalog, CatalogError};
use crate::query::BookListParams;

#[derive(Debug, Parser)]
#[command(name = "pageturner-server", version, about = "Read-only book catalog API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeConfig,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the HTTP API (default).
    Serve(ServeConfig),
    /// Run one book query against the catalog and print the result as JSON.
    Query(QueryArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeConfig {
    #[arg(long, env = "PAGETURNER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[command(flatten)]
    pub catalog: CatalogSource,
}

impl ServeConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct CatalogSource {
    /// Load the catalog from this JSON file instead of the bundled seed.
    #[arg(long, env = "PAGETURNER_CATALOG")]
    pub catalog: Option<PathBuf>,
}

impl CatalogSource {
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path),
            None => Catalog::seeded(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Comma-separated category ids.
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub search: Option<String>,

    /// One of popularity, newest, rating, title.
    #[arg(long)]
    pub sort: Option<String>,

    /// Only featured books: `true` or `false`. A bare `--featured` means `true`.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub featured: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub limit: Option<String>,

    #[arg(long)]
    pub exclude: Option<String>,

    #[command(flatten)]
    pub catalog: CatalogSource,
}

impl QueryArgs {
    pub fn params(&self) -> BookListParams {
        BookListParams {
            category: self.category.clone(),
            search: self.search.clone(),
            sort: self.sort.clone(),
            featured: self.featured.clone(),
            limit: self.limit.clone(),
            exclude: self.exclude.clone(),
        }
    }
}
