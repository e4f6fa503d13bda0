use crate::db::repositories::category::CategoryRepository;
use crate::domain::AnimeId;
use crate::entities::{anime, anime_categories, categories};
use crate::models::{Anime, Category, NewAnime};
use chrono::NaiveDate;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use super::{contains_pattern, is_unique_violation};

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_anime(model: anime::Model, mut categories: Vec<Category>) -> Anime {
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Anime {
            id: AnimeId::new(model.id),
            title: model.title,
            synopsis: model.synopsis,
            episodes: model.episodes,
            image_url: model.image_url,
            status: model.status,
            release_date: model.release_date,
            categories,
        }
    }

    /// Attaches categories to a batch of rows with one join query.
    async fn hydrate(&self, rows: Vec<anime::Model>) -> anyhow::Result<Vec<Anime>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let links = anime_categories::Entity::find()
            .filter(anime_categories::Column::AnimeId.is_in(ids))
            .find_also_related(categories::Entity)
            .all(&self.conn)
            .await?;

        let mut by_anime: HashMap<i32, Vec<Category>> = HashMap::new();
        for (link, category) in links {
            if let Some(category) = category {
                by_anime
                    .entry(link.anime_id)
                    .or_default()
                    .push(CategoryRepository::map_model(category));
            }
        }

        Ok(rows
            .into_iter()
            .map(|model| {
                let categories = by_anime.remove(&model.id).unwrap_or_default();
                Self::map_model_to_anime(model, categories)
            })
            .collect())
    }

    pub async fn get(&self, id: AnimeId) -> anyhow::Result<Option<Anime>> {
        let Some(model) = anime::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![model]).await?.pop())
    }

    pub async fn get_by_title(&self, title: &str) -> anyhow::Result<Option<Anime>> {
        let Some(model) = anime::Entity::find()
            .filter(anime::Column::Title.eq(title))
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };
        Ok(self.hydrate(vec![model]).await?.pop())
    }

    /// Titles containing `text`, case-insensitively, oldest import first.
    pub async fn find_by_title_containing(&self, text: &str) -> anyhow::Result<Vec<Anime>> {
        let rows = anime::Entity::find()
            .filter(anime::Column::TitleKey.like(LikeExpr::new(contains_pattern(text)).escape('\\')))
            .order_by_asc(anime::Column::Id)
            .all(&self.conn)
            .await?;
        self.hydrate(rows).await
    }

    pub async fn list_by_release_year(&self, year: i32) -> anyhow::Result<Vec<Anime>> {
        let (Some(start), Some(end)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) else {
            return Ok(Vec::new());
        };

        let rows = anime::Entity::find()
            .filter(anime::Column::ReleaseDate.between(start, end))
            .order_by_asc(anime::Column::ReleaseDate)
            .order_by_asc(anime::Column::Title)
            .all(&self.conn)
            .await?;
        self.hydrate(rows).await
    }

    /// Anime linked to any category whose name contains `name`.
    pub async fn list_by_category_name(&self, name: &str) -> anyhow::Result<Vec<Anime>> {
        let rows = anime::Entity::find()
            .join(JoinType::InnerJoin, anime::Relation::AnimeCategories.def())
            .join(JoinType::InnerJoin, anime_categories::Relation::Category.def())
            .filter(
                categories::Column::NameKey.like(LikeExpr::new(contains_pattern(name)).escape('\\')),
            )
            .distinct()
            .order_by_asc(anime::Column::Title)
            .all(&self.conn)
            .await?;
        self.hydrate(rows).await
    }

    /// Writes the anime row and both sides of its category links in one
    /// transaction.
    ///
    /// A unique-title conflict means another writer imported the same title
    /// after our dedup check; the stored row wins and is returned.
    pub async fn insert(&self, new: &NewAnime, categories: &[Category]) -> anyhow::Result<Anime> {
        let txn = self.conn.begin().await?;

        let active_model = anime::ActiveModel {
            title: Set(new.title.clone()),
            title_key: Set(new.title.to_lowercase()),
            synopsis: Set(new.synopsis.clone()),
            episodes: Set(new.episodes),
            image_url: Set(new.image_url.clone()),
            status: Set(new.status.clone()),
            release_date: Set(new.release_date),
            created_at: Set(Some(chrono::Utc::now().to_rfc3339())),
            ..Default::default()
        };

        let model = match active_model.insert(&txn).await {
            Ok(model) => model,
            Err(e) if is_unique_violation(&e) => {
                txn.rollback().await?;
                debug!(title = %new.title, "Title inserted concurrently, returning stored row");
                return self
                    .get_by_title(&new.title)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Anime '{}' vanished after conflict", new.title));
            }
            Err(e) => return Err(e.into()),
        };

        let mut seen = HashSet::new();
        let linked: Vec<Category> = categories
            .iter()
            .filter(|c| seen.insert(c.id))
            .cloned()
            .collect();

        if !linked.is_empty() {
            let links = linked.iter().map(|c| anime_categories::ActiveModel {
                anime_id: Set(model.id),
                category_id: Set(c.id.value()),
            });
            anime_categories::Entity::insert_many(links).exec(&txn).await?;
        }

        txn.commit().await?;

        info!(id = model.id, title = %model.title, categories = linked.len(), "Saved anime");
        Ok(Self::map_model_to_anime(model, linked))
    }
}
