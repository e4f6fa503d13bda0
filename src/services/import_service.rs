//! Domain service for importing catalog records into the local store.
//!
//! This module defines the error kinds and result types of the import
//! pipeline and the [`ImportService`] trait the CLI (or any routing layer)
//! drives. The default implementation lives in
//! [`crate::services::import_service_impl`].

use crate::clients::CatalogError;
use crate::models::Anime;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by an import call.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Catalog import is disabled by configuration")]
    ServiceUnavailable,

    #[error("Anime not found in catalog: {0}")]
    NotFound(String),

    #[error("Catalog service error: {message}")]
    ExternalService {
        /// Upstream HTTP status, absent when the request never got an answer.
        status: Option<u16>,
        message: String,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ImportError {
    /// Wraps a call-level catalog failure.
    #[must_use]
    pub fn external(err: &CatalogError) -> Self {
        Self::ExternalService {
            status: err.status(),
            message: err.to_string(),
        }
    }

    /// HTTP status a routing layer should answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ServiceUnavailable => 503,
            Self::NotFound(_) => 404,
            Self::ExternalService { status, .. } => match status {
                Some(s) if (400..600).contains(s) => *s,
                _ => 502,
            },
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }
}

impl From<anyhow::Error> for ImportError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl From<sea_orm::DbErr> for ImportError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A catalog record the batch import could not store.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRecord {
    /// Zero-based position in the catalog response.
    pub position: usize,
    pub mal_id: Option<i64>,
    pub title: Option<String>,
    pub reason: String,
}

/// Accumulated result of a year-batch import.
#[derive(Debug, Default, Serialize)]
pub struct BatchImportOutcome {
    /// Stored anime in catalog order, including titles that were already
    /// present locally.
    pub imported: Vec<Anime>,
    pub skipped: Vec<SkippedRecord>,
}

impl BatchImportOutcome {
    #[must_use]
    pub fn total(&self) -> usize {
        self.imported.len() + self.skipped.len()
    }
}

/// Domain service trait for catalog import operations.
#[async_trait::async_trait]
pub trait ImportService: Send + Sync {
    /// Imports the best catalog match for `title`.
    ///
    /// A local anime whose title contains `title` (case-insensitively) is
    /// returned as-is without contacting the catalog. `Ok(None)` means the
    /// catalog answered with an empty result set.
    ///
    /// # Errors
    ///
    /// - [`ImportError::ServiceUnavailable`] when importing is disabled
    /// - [`ImportError::Validation`] for a blank title
    /// - [`ImportError::NotFound`] when the catalog answers 404
    /// - [`ImportError::ExternalService`] for other catalog failures
    /// - [`ImportError::Internal`] when decoding, normalizing or saving the
    ///   first record fails
    async fn import_by_title(&self, title: &str) -> Result<Option<Anime>, ImportError>;

    /// Imports every record the catalog lists for `year`, one at a time.
    ///
    /// Per-record failures are logged and collected in
    /// [`BatchImportOutcome::skipped`]; they never fail the call.
    ///
    /// # Errors
    ///
    /// - [`ImportError::ServiceUnavailable`] when importing is disabled
    /// - [`ImportError::Validation`] for a year outside 1..=9999
    /// - [`ImportError::ExternalService`] when the catalog call fails
    async fn import_year_batch(&self, year: i32) -> Result<BatchImportOutcome, ImportError>;

    /// Same as [`ImportService::import_year_batch`], keeping only the stored
    /// anime.
    ///
    /// # Errors
    ///
    /// See [`ImportService::import_year_batch`].
    async fn import_by_year(&self, year: i32) -> Result<Vec<Anime>, ImportError> {
        Ok(self.import_year_batch(year).await?.imported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_error_display() {
        assert_eq!(
            ImportError::ServiceUnavailable.to_string(),
            "Catalog import is disabled by configuration"
        );
        assert_eq!(
            ImportError::NotFound("Frieren".to_string()).to_string(),
            "Anime not found in catalog: Frieren"
        );
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(ImportError::ServiceUnavailable.status_code(), 503);
        assert_eq!(ImportError::NotFound(String::new()).status_code(), 404);
        assert_eq!(ImportError::Internal(String::new()).status_code(), 500);
        assert_eq!(
            ImportError::ExternalService {
                status: Some(429),
                message: String::new()
            }
            .status_code(),
            429
        );
        assert_eq!(
            ImportError::ExternalService {
                status: None,
                message: String::new()
            }
            .status_code(),
            502
        );
    }

    #[test]
    fn catalog_errors_keep_upstream_status() {
        let err = ImportError::external(&CatalogError::Status {
            status: 500,
            body: "upstream down".to_string(),
        });
        assert!(matches!(
            err,
            ImportError::ExternalService {
                status: Some(500),
                ..
            }
        ));
    }

    #[test]
    fn db_errors_become_internal() {
        let err: ImportError = sea_orm::DbErr::Custom("disk full".to_string()).into();
        assert!(matches!(err, ImportError::Internal(_)));
    }
}
