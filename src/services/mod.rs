pub mod categories;
pub use categories::CategoryResolver;

pub mod normalizer;
pub use normalizer::normalize_record;

pub mod import_service;
pub mod import_service_impl;
pub use import_service::{BatchImportOutcome, ImportError, ImportService, SkippedRecord};
pub use import_service_impl::DefaultImportService;

pub mod watch_list;
pub use watch_list::{WatchListError, WatchListService};
