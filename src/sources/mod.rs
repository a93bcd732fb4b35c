//! Collaborator seams for the three remote services
//!
//! The engine only ever talks to the catalog, the title resolver, and the
//! document source through these traits, so tests can swap the HTTP
//! implementations for scripted doubles without touching handler logic.

mod catalog;
mod documents;
mod resolver;

pub use catalog::{CatalogEntry, CatalogPage, HttpCatalog};
pub use documents::{FetchedDocument, HttpDocuments};
pub use resolver::HttpResolver;

use crate::Result;
use async_trait::async_trait;

/// Paginated catalog of entries to process
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches one catalog page (1-based)
    ///
    /// Implementations absorb transient API-level failures (rate limiting)
    /// by retrying under their policy; an error here is terminal for the
    /// requesting command.
    async fn fetch_page(&self, page: u32) -> Result<CatalogPage>;
}

/// Cross-reference search by title words
#[async_trait]
pub trait TitleResolver: Send + Sync {
    /// Queries with the joined words; `Ok(None)` is a miss
    ///
    /// A returned id is already normalized (no `tt` prefix).
    async fn search(&self, words: &[&str]) -> Result<Option<String>>;
}

/// Per-entry document fetch
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetches the raw document for an IMDB id, returning the address used
    async fn fetch_document(&self, imdb_id: &str) -> Result<FetchedDocument>;
}
