use crate::domain::{AnimeId, CategoryId};
use crate::models::{
    Anime, Category, CategoryWithAnime, NewAnime, WatchEntry, WatchStatus, WatchUpdate,
};
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to an in-memory database gets its own empty
        // database, so pin the pool to one connection.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn watch_list_repo(&self) -> repositories::watch_list::WatchListRepository {
        repositories::watch_list::WatchListRepository::new(self.conn.clone())
    }

    pub async fn find_anime_by_title_containing(&self, text: &str) -> Result<Vec<Anime>> {
        self.anime_repo().find_by_title_containing(text).await
    }

    pub async fn get_anime(&self, id: AnimeId) -> Result<Option<Anime>> {
        self.anime_repo().get(id).await
    }

    pub async fn save_anime(&self, anime: &NewAnime, categories: &[Category]) -> Result<Anime> {
        self.anime_repo().insert(anime, categories).await
    }

    pub async fn list_anime_by_release_year(&self, year: i32) -> Result<Vec<Anime>> {
        self.anime_repo().list_by_release_year(year).await
    }

    pub async fn list_anime_by_category(&self, name: &str) -> Result<Vec<Anime>> {
        self.anime_repo().list_by_category_name(name).await
    }

    pub async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.category_repo().find_by_name(name).await
    }

    pub async fn save_category(&self, name: &str) -> Result<Category> {
        self.category_repo().insert(name).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.category_repo().list_all().await
    }

    pub async fn get_category_with_anime(&self, id: CategoryId) -> Result<Option<CategoryWithAnime>> {
        self.category_repo().get_with_anime(id).await
    }

    pub async fn get_watch_entry(&self, id: i32) -> Result<Option<WatchEntry>> {
        self.watch_list_repo().get(id).await
    }

    pub async fn upsert_watch_entry(
        &self,
        anime_id: AnimeId,
        status: WatchStatus,
    ) -> Result<WatchEntry> {
        self.watch_list_repo().upsert(anime_id, status).await
    }

    pub async fn update_watch_entry(
        &self,
        id: i32,
        update: &WatchUpdate,
    ) -> Result<Option<WatchEntry>> {
        self.watch_list_repo().update(id, update).await
    }

    pub async fn delete_watch_entry(&self, id: i32) -> Result<bool> {
        self.watch_list_repo().delete(id).await
    }

    pub async fn list_watch_entries(&self, status: Option<WatchStatus>) -> Result<Vec<WatchEntry>> {
        self.watch_list_repo().list(status).await
    }

    pub async fn watch_status_counts(&self) -> Result<BTreeMap<WatchStatus, u64>> {
        self.watch_list_repo().status_counts().await
    }
}
