mod categories;
mod import;
mod info;
mod list;
mod watch;

pub use categories::{cmd_categories, cmd_category_info};
pub use import::{cmd_import_title, cmd_import_year};
pub use info::cmd_anime_info;
pub use list::{cmd_list_by_genre, cmd_list_by_year, cmd_search};
pub use watch::{cmd_unwatch, cmd_update_entry, cmd_watch, cmd_watch_stats, cmd_watchlist};

use crate::models::Anime;

pub(super) fn print_anime_line(anime: &Anime) {
    let eps = anime
        .episodes
        .map_or_else(|| "? eps".to_string(), |e| format!("{e} eps"));
    let released = anime
        .release_date
        .map_or_else(|| "unknown".to_string(), |d| d.to_string());

    println!("[{}] {} ({})", anime.id, anime.title, eps);
    println!(
        "    Status: {} | Released: {}",
        anime.status.as_deref().unwrap_or("?"),
        released
    );
}
