use crate::domain::{AnimeId, CategoryId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anime {
    pub id: AnimeId,
    pub title: String,
    pub synopsis: Option<String>,
    pub episodes: Option<i32>,
    pub image_url: Option<String>,
    pub status: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Sorted by name, never contains the same category twice.
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A normalized record that has not been written to the store yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewAnime {
    pub title: String,
    pub synopsis: Option<String>,
    pub episodes: Option<i32>,
    pub image_url: Option<String>,
    pub status: Option<String>,
    pub release_date: Option<NaiveDate>,
    /// Genre names in upstream order, blanks already dropped.
    pub genres: Vec<String>,
}

/// A category together with the inverse side of the association.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryWithAnime {
    pub category: Category,
    pub anime_ids: Vec<AnimeId>,
}
