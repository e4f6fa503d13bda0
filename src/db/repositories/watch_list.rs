use crate::domain::AnimeId;
use crate::entities::{anime, watch_list};
use crate::models::{WatchEntry, WatchStatus, WatchUpdate};
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Repository for the single-user watch list.
pub struct WatchListRepository {
    conn: DatabaseConnection,
}

impl WatchListRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: watch_list::Model, anime: Option<anime::Model>) -> Result<WatchEntry> {
        Ok(WatchEntry {
            id: model.id,
            anime_id: AnimeId::new(model.anime_id),
            anime_title: anime.map(|a| a.title).unwrap_or_default(),
            status: model.status.parse()?,
            score: model.score,
            episodes_watched: model.episodes_watched,
            updated_at: model.updated_at,
        })
    }

    pub async fn get(&self, id: i32) -> Result<Option<WatchEntry>> {
        watch_list::Entity::find_by_id(id)
            .find_also_related(anime::Entity)
            .one(&self.conn)
            .await?
            .map(|(entry, anime)| Self::map_model(entry, anime))
            .transpose()
    }

    pub async fn get_by_anime(&self, anime_id: AnimeId) -> Result<Option<WatchEntry>> {
        watch_list::Entity::find()
            .filter(watch_list::Column::AnimeId.eq(anime_id.value()))
            .find_also_related(anime::Entity)
            .one(&self.conn)
            .await?
            .map(|(entry, anime)| Self::map_model(entry, anime))
            .transpose()
    }

    /// Adds the anime with `status`, or moves an existing entry to `status`.
    ///
    /// New entries start at score 0 with no episodes watched; an existing
    /// entry keeps its score and progress.
    pub async fn upsert(&self, anime_id: AnimeId, status: WatchStatus) -> Result<WatchEntry> {
        let now = chrono::Utc::now().to_rfc3339();
        let active_model = watch_list::ActiveModel {
            anime_id: Set(anime_id.value()),
            status: Set(status.as_str().to_string()),
            score: Set(0),
            episodes_watched: Set(0),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        watch_list::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(watch_list::Column::AnimeId)
                    .update_columns([watch_list::Column::Status, watch_list::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        debug!(anime_id = %anime_id, status = %status, "Upserted watch list entry");

        self.get_by_anime(anime_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Watch entry for anime {anime_id} vanished after upsert"))
    }

    /// Applies the set fields of `update`. `None` when the entry does not exist.
    pub async fn update(&self, id: i32, update: &WatchUpdate) -> Result<Option<WatchEntry>> {
        let Some(model) = watch_list::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: watch_list::ActiveModel = model.into();
        if let Some(status) = update.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(score) = update.score {
            active.score = Set(score);
        }
        if let Some(episodes) = update.episodes_watched {
            active.episodes_watched = Set(episodes);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        self.get(id).await
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = watch_list::Entity::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Entries ordered by anime title, optionally narrowed to one status.
    pub async fn list(&self, status: Option<WatchStatus>) -> Result<Vec<WatchEntry>> {
        let mut select = watch_list::Entity::find();
        if let Some(status) = status {
            select = select.filter(watch_list::Column::Status.eq(status.as_str()));
        }

        select
            .find_also_related(anime::Entity)
            .order_by_asc(anime::Column::Title)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|(entry, anime)| Self::map_model(entry, anime))
            .collect()
    }

    /// Entry count per status; statuses with no entries report zero.
    pub async fn status_counts(&self) -> Result<BTreeMap<WatchStatus, u64>> {
        let rows: Vec<(String, i64)> = watch_list::Entity::find()
            .select_only()
            .column(watch_list::Column::Status)
            .column_as(watch_list::Column::Id.count(), "count")
            .group_by(watch_list::Column::Status)
            .into_tuple()
            .all(&self.conn)
            .await?;

        let mut counts: BTreeMap<WatchStatus, u64> =
            WatchStatus::ALL.into_iter().map(|status| (status, 0)).collect();
        for (status, count) in rows {
            counts.insert(status.parse()?, u64::try_from(count).unwrap_or(0));
        }

        Ok(counts)
    }
}
