pub use super::anime::Entity as Anime;
pub use super::anime_categories::Entity as AnimeCategories;
pub use super::categories::Entity as Categories;
pub use super::watch_list::Entity as WatchList;
