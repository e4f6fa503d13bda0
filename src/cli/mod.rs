//! CLI module - Command-line interface for animeshelf
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use crate::models::WatchStatus;
use clap::{Parser, Subcommand};

/// animeshelf - Anime catalog importer
/// Pulls anime metadata from Jikan into a local library
#[derive(Parser)]
#[command(name = "animeshelf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import the best catalog match for a title
    #[command(alias = "it")]
    ImportTitle {
        /// Title to search for
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Import every anime that started airing in a year
    #[command(alias = "iy")]
    ImportYear {
        /// Calendar year, e.g. 2011
        year: i32,
    },

    /// Search the local library by title
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List local anime in a genre
    #[command(alias = "g")]
    Genre {
        /// Genre name (partial, case-insensitive)
        name: String,
    },

    /// List local anime released in a year
    #[command(alias = "y")]
    Year {
        /// Calendar year
        year: i32,
    },

    /// Show details about a stored anime
    #[command(alias = "i")]
    Info {
        /// Anime ID
        id: String,
    },

    /// List categories, or show the anime of one category
    #[command(alias = "cat")]
    Categories {
        /// Category ID
        id: Option<i32>,
    },

    /// Put a stored anime on your watch list, or change its status
    #[command(alias = "w")]
    Watch {
        /// Anime ID
        anime_id: i32,

        /// watching, completed, on_hold, dropped or plan_to_watch
        #[arg(short, long, default_value = "plan_to_watch")]
        status: WatchStatus,
    },

    /// Update status, score or progress of a watch list entry
    #[command(alias = "ue")]
    UpdateEntry {
        /// Watch list entry ID
        entry_id: i32,

        #[arg(short, long)]
        status: Option<WatchStatus>,

        /// Score from 0 to 10
        #[arg(long)]
        score: Option<i32>,

        /// Episodes watched so far
        #[arg(short, long)]
        episodes: Option<i32>,
    },

    /// Remove an entry from your watch list
    Unwatch {
        /// Watch list entry ID
        entry_id: i32,
    },

    /// Show your watch list
    #[command(alias = "wl")]
    Watchlist {
        /// Only entries with this status
        #[arg(short, long)]
        status: Option<WatchStatus>,
    },

    /// Count watch list entries per status
    WatchStats,

    /// Create default config file
    Init,
}

pub use commands::*;
