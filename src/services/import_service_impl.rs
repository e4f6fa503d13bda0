//! Default implementation of the `ImportService` trait.

use crate::clients::{CatalogClient, CatalogError, RawRecord};
use crate::config::CatalogConfig;
use crate::db::Store;
use crate::models::Anime;
use crate::services::categories::CategoryResolver;
use crate::services::import_service::{
    BatchImportOutcome, ImportError, ImportService, SkippedRecord,
};
use crate::services::normalizer::normalize_record;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Import pipeline over a [`CatalogClient`] and the SQLite [`Store`].
///
/// Records are processed strictly one after another so dedup lookups and
/// category creation within one call never race each other. Concurrent calls
/// are not coordinated here; the store's unique keys settle those races.
pub struct DefaultImportService {
    store: Store,
    catalog: Arc<dyn CatalogClient>,
    categories: CategoryResolver,
    enabled: bool,
}

impl DefaultImportService {
    #[must_use]
    pub fn new(store: Store, catalog: Arc<dyn CatalogClient>, config: &CatalogConfig) -> Self {
        Self {
            categories: CategoryResolver::new(store.clone()),
            store,
            catalog,
            enabled: config.enabled,
        }
    }

    fn ensure_enabled(&self) -> Result<(), ImportError> {
        if self.enabled {
            Ok(())
        } else {
            warn!("Catalog import requested while disabled, refusing");
            Err(ImportError::ServiceUnavailable)
        }
    }

    /// First local anime whose title contains `title`, if any.
    ///
    /// This is a substring match, so a short query can hit an unrelated
    /// longer title.
    async fn find_existing(&self, title: &str) -> Result<Option<Anime>, ImportError> {
        Ok(self
            .store
            .find_anime_by_title_containing(title)
            .await?
            .into_iter()
            .next())
    }

    /// Decoding, normalization, dedup check and save for one catalog entry.
    async fn import_record(&self, entry: &Value) -> Result<Anime, ImportError> {
        let raw = RawRecord::from_value(entry)
            .map_err(|e| ImportError::Internal(format!("malformed catalog record: {e}")))?;
        let new_anime = normalize_record(&raw)?;

        if let Some(existing) = self.find_existing(&new_anime.title).await? {
            debug!(
                title = %new_anime.title,
                id = %existing.id,
                "Anime already in store, skipping import"
            );
            return Ok(existing);
        }

        let categories = self.categories.resolve_all(&new_anime.genres).await?;
        let saved = self.store.save_anime(&new_anime, &categories).await?;
        Ok(saved)
    }
}

fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    if !(1..=9999).contains(&year) {
        return None;
    }
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

#[async_trait]
impl ImportService for DefaultImportService {
    async fn import_by_title(&self, title: &str) -> Result<Option<Anime>, ImportError> {
        self.ensure_enabled()?;

        let title = title.trim();
        if title.is_empty() {
            return Err(ImportError::Validation("title cannot be empty".to_string()));
        }

        if let Some(existing) = self.find_existing(title).await? {
            info!(query = %title, id = %existing.id, "Anime already in store, returning existing");
            return Ok(Some(existing));
        }

        let records = self
            .catalog
            .fetch_by_title(title)
            .await
            .map_err(|e| match e {
                CatalogError::NotFound => {
                    warn!(query = %title, "Catalog returned 404 for title");
                    ImportError::NotFound(title.to_string())
                }
                other => {
                    error!(query = %title, error = %other, "Catalog title search failed");
                    ImportError::external(&other)
                }
            })?;

        let Some(first) = records.first() else {
            info!(query = %title, "Catalog returned no results");
            return Ok(None);
        };

        let anime = self.import_record(first).await?;
        info!(query = %title, id = %anime.id, title = %anime.title, "Imported anime from catalog");
        Ok(Some(anime))
    }

    async fn import_year_batch(&self, year: i32) -> Result<BatchImportOutcome, ImportError> {
        self.ensure_enabled()?;

        let (start, end) = year_bounds(year)
            .ok_or_else(|| ImportError::Validation(format!("year {year} is out of range")))?;

        let records = self
            .catalog
            .fetch_by_date_range(start, end)
            .await
            .map_err(|e| {
                error!(year, error = %e, "Catalog date-range query failed");
                ImportError::external(&e)
            })?;

        info!(year, count = records.len(), "Fetched catalog records for year");

        let mut outcome = BatchImportOutcome::default();
        for (position, record) in records.iter().enumerate() {
            match self.import_record(record).await {
                Ok(anime) => outcome.imported.push(anime),
                Err(e) => {
                    let mal_id = RawRecord::peek_mal_id(record);
                    let title = RawRecord::peek_title(record);
                    warn!(
                        year,
                        mal_id = ?mal_id,
                        title = title.unwrap_or("<untitled>"),
                        error = %e,
                        "Failed to import catalog record, skipping"
                    );
                    outcome.skipped.push(SkippedRecord {
                        position,
                        mal_id,
                        title: title.map(str::to_string),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            year,
            imported = outcome.imported.len(),
            skipped = outcome.skipped.len(),
            "Year import finished"
        );
        Ok(outcome)
    }
}
