//! Clients for the external read-only catalog.

pub mod jikan;

pub use jikan::{JikanClient, RawRecord};

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

/// Failure reaching the catalog or reading its response.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog returned 404 Not Found")]
    NotFound,

    #[error("Catalog API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Catalog response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// Upstream HTTP status, when the catalog answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

/// Read side of the external catalog consumed by the import pipeline.
///
/// Both calls return a single page of entries as untyped JSON, decoded later
/// with [`RawRecord::from_value`]. No pagination and no retries happen behind
/// this seam.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Searches the catalog by title.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NotFound`] when the catalog answers 404
    /// - [`CatalogError::Status`] for any other non-success status
    async fn fetch_by_title(&self, title: &str) -> Result<Vec<Value>, CatalogError>;

    /// Lists records whose airing started inside `[start, end]`.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::fetch_by_title`].
    async fn fetch_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Value>, CatalogError>;
}
