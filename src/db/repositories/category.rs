use crate::domain::{AnimeId, CategoryId, category_key};
use crate::entities::{anime_categories, categories};
use crate::models::{Category, CategoryWithAnime};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::is_unique_violation;

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub(crate) fn map_model(model: categories::Model) -> Category {
        Category {
            id: CategoryId::new(model.id),
            name: model.name,
        }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let model = categories::Entity::find()
            .filter(categories::Column::NameKey.eq(category_key(name)))
            .one(&self.conn)
            .await?;
        Ok(model.map(Self::map_model))
    }

    /// Inserts a category with the given casing.
    ///
    /// If another writer inserted the same case-folded name first, the unique
    /// key rejects this insert and the existing row is returned instead.
    pub async fn insert(&self, name: &str) -> Result<Category> {
        let active_model = categories::ActiveModel {
            name: Set(name.to_string()),
            name_key: Set(category_key(name)),
            ..Default::default()
        };

        match active_model.insert(&self.conn).await {
            Ok(model) => {
                debug!(category = %model.name, id = model.id, "Created category");
                Ok(Self::map_model(model))
            }
            Err(e) if is_unique_violation(&e) => {
                debug!(category = %name, "Category inserted concurrently, reusing existing row");
                self.find_by_name(name)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("Category '{name}' vanished after conflict"))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<Category>> {
        let rows = categories::Entity::find()
            .order_by_asc(categories::Column::NameKey)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get_with_anime(&self, id: CategoryId) -> Result<Option<CategoryWithAnime>> {
        let Some(model) = categories::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let anime_ids = anime_categories::Entity::find()
            .filter(anime_categories::Column::CategoryId.eq(model.id))
            .order_by_asc(anime_categories::Column::AnimeId)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|link| AnimeId::new(link.anime_id))
            .collect();

        Ok(Some(CategoryWithAnime {
            category: Self::map_model(model),
            anime_ids,
        }))
    }
}
