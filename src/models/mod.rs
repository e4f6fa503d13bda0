pub mod anime;
pub mod watch;

pub use anime::{Anime, Category, CategoryWithAnime, NewAnime};
pub use watch::{ParseWatchStatusError, WatchEntry, WatchStatus, WatchUpdate};
