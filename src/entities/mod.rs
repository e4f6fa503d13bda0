pub mod prelude;

pub mod anime;
pub mod anime_categories;
pub mod categories;
pub mod watch_list;
