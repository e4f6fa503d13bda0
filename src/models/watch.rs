use crate::domain::AnimeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Where an anime stands on the personal watch list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
}

impl WatchStatus {
    pub const ALL: [Self; 5] = [
        Self::Watching,
        Self::Completed,
        Self::OnHold,
        Self::Dropped,
        Self::PlanToWatch,
    ];

    /// Stored and displayed form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use animeshelf::models::WatchStatus;
    ///
    /// assert_eq!(WatchStatus::PlanToWatch.as_str(), "plan_to_watch");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
            Self::Dropped => "dropped",
            Self::PlanToWatch => "plan_to_watch",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown watch status '{0}' (expected watching, completed, on_hold, dropped or plan_to_watch)")]
pub struct ParseWatchStatusError(String);

impl FromStr for WatchStatus {
    type Err = ParseWatchStatusError;

    /// Case-insensitive; `-` and space are accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseWatchStatusError(s.to_string()))
    }
}

/// One anime on the watch list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchEntry {
    pub id: i32,
    pub anime_id: AnimeId,
    pub anime_title: String,
    pub status: WatchStatus,
    pub score: i32,
    pub episodes_watched: i32,
    pub updated_at: String,
}

/// Partial edit of a watch list entry; `None` leaves a field unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchUpdate {
    pub status: Option<WatchStatus>,
    pub score: Option<i32>,
    pub episodes_watched: Option<i32>,
}

impl WatchUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none() && self.score.is_none() && self.episodes_watched.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_loose_spellings() {
        assert_eq!("watching".parse::<WatchStatus>().unwrap(), WatchStatus::Watching);
        assert_eq!("ON-HOLD".parse::<WatchStatus>().unwrap(), WatchStatus::OnHold);
        assert_eq!(
            " plan to watch ".parse::<WatchStatus>().unwrap(),
            WatchStatus::PlanToWatch
        );
        assert!("rewatching".parse::<WatchStatus>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for status in WatchStatus::ALL {
            assert_eq!(status.to_string().parse::<WatchStatus>().unwrap(), status);
        }
    }

    #[test]
    fn empty_update() {
        assert!(WatchUpdate::default().is_empty());
        assert!(
            !WatchUpdate {
                score: Some(8),
                ..WatchUpdate::default()
            }
            .is_empty()
        );
    }
}
