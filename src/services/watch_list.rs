//! Personal watch list kept next to the imported catalog.
//!
//! There is a single local user, so every entry belongs to the same list.

use crate::db::Store;
use crate::domain::AnimeId;
use crate::models::{WatchEntry, WatchStatus, WatchUpdate};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::info;

pub const MAX_SCORE: i32 = 10;

#[derive(Debug, Error)]
pub enum WatchListError {
    #[error("Anime not found in library: {0}")]
    AnimeNotFound(AnimeId),

    #[error("Watch list entry not found: {0}")]
    EntryNotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WatchListError {
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::AnimeNotFound(_) | Self::EntryNotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }
}

impl From<anyhow::Error> for WatchListError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

#[derive(Clone)]
pub struct WatchListService {
    store: Store,
}

impl WatchListService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Puts a stored anime on the list, or changes the status of its entry.
    ///
    /// # Errors
    ///
    /// [`WatchListError::AnimeNotFound`] when the anime was never imported.
    pub async fn add(
        &self,
        anime_id: AnimeId,
        status: WatchStatus,
    ) -> Result<WatchEntry, WatchListError> {
        if self.store.get_anime(anime_id).await?.is_none() {
            return Err(WatchListError::AnimeNotFound(anime_id));
        }

        let entry = self.store.upsert_watch_entry(anime_id, status).await?;
        info!(entry_id = entry.id, anime_id = %anime_id, status = %status, "Watch list entry saved");
        Ok(entry)
    }

    /// Changes status, score or progress of an entry.
    ///
    /// # Errors
    ///
    /// - [`WatchListError::Validation`] for an empty update, a score outside
    ///   `0..=10`, or progress that is negative or beyond the known episode
    ///   count
    /// - [`WatchListError::EntryNotFound`] when no entry has this id
    pub async fn update(
        &self,
        entry_id: i32,
        update: WatchUpdate,
    ) -> Result<WatchEntry, WatchListError> {
        if update.is_empty() {
            return Err(WatchListError::Validation("nothing to update".to_string()));
        }
        if let Some(score) = update.score
            && !(0..=MAX_SCORE).contains(&score)
        {
            return Err(WatchListError::Validation(format!(
                "score must be between 0 and {MAX_SCORE}, got {score}"
            )));
        }
        if let Some(episodes) = update.episodes_watched
            && episodes < 0
        {
            return Err(WatchListError::Validation(
                "episodes watched cannot be negative".to_string(),
            ));
        }

        let entry = self
            .store
            .get_watch_entry(entry_id)
            .await?
            .ok_or(WatchListError::EntryNotFound(entry_id))?;

        if let Some(episodes) = update.episodes_watched
            && let Some(total) = self
                .store
                .get_anime(entry.anime_id)
                .await?
                .and_then(|anime| anime.episodes)
            && episodes > total
        {
            return Err(WatchListError::Validation(format!(
                "{} has {total} episodes, cannot mark {episodes} as watched",
                entry.anime_title
            )));
        }

        let updated = self
            .store
            .update_watch_entry(entry_id, &update)
            .await?
            .ok_or(WatchListError::EntryNotFound(entry_id))?;
        info!(entry_id, status = %updated.status, "Watch list entry updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// [`WatchListError::EntryNotFound`] when no entry has this id.
    pub async fn remove(&self, entry_id: i32) -> Result<(), WatchListError> {
        if self.store.delete_watch_entry(entry_id).await? {
            info!(entry_id, "Watch list entry removed");
            Ok(())
        } else {
            Err(WatchListError::EntryNotFound(entry_id))
        }
    }

    pub async fn list(
        &self,
        status: Option<WatchStatus>,
    ) -> Result<Vec<WatchEntry>, WatchListError> {
        Ok(self.store.list_watch_entries(status).await?)
    }

    pub async fn status_counts(&self) -> Result<BTreeMap<WatchStatus, u64>, WatchListError> {
        Ok(self.store.watch_status_counts().await?)
    }
}
