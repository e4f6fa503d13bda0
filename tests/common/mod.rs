//! Shared fixtures for integration tests.
#![allow(dead_code)]

use animeshelf::clients::{CatalogClient, CatalogError};
use animeshelf::config::CatalogConfig;
use animeshelf::db::Store;
use animeshelf::services::DefaultImportService;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A store backed by a temp SQLite file that is removed on drop.
pub struct TestStore {
    store: Store,
    path: PathBuf,
}

impl TestStore {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Deref for TestStore {
    type Target = Store;

    fn deref(&self) -> &Store {
        &self.store
    }
}

impl Drop for TestStore {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut path = self.path.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

pub async fn spawn_store() -> TestStore {
    let path =
        std::env::temp_dir().join(format!("animeshelf-test-{}.db", uuid::Uuid::new_v4()));
    let store = Store::new(&format!("sqlite:{}", path.display()))
        .await
        .expect("failed to open test store");
    TestStore { store, path }
}

/// A catalog entry shaped like a Jikan `/anime` item.
pub fn raw_record(mal_id: i64, title: &str, aired_from: Option<&str>, genres: &[&str]) -> Value {
    json!({
        "mal_id": mal_id,
        "title": title,
        "synopsis": format!("Synopsis of {title}"),
        "episodes": 12,
        "images": {"jpg": {"image_url": format!("https://cdn.example.com/{mal_id}.jpg")}},
        "status": "Finished Airing",
        "aired": {"from": aired_from},
        "genres": genres.iter().map(|name| json!({"name": name})).collect::<Vec<_>>(),
    })
}

/// Replaces one field of a catalog entry.
pub fn with_field(mut record: Value, field: &str, value: Value) -> Value {
    record[field] = value;
    record
}

/// What the fake catalog answers with.
pub enum Reply {
    Records(Vec<Value>),
    NotFound,
    Status(u16),
}

/// In-memory catalog that records every call it receives.
pub struct FakeCatalog {
    reply: Mutex<Reply>,
    calls: AtomicUsize,
    ranges: Mutex<Vec<(NaiveDate, NaiveDate)>>,
}

impl FakeCatalog {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(reply),
            calls: AtomicUsize::new(0),
            ranges: Mutex::new(Vec::new()),
        })
    }

    pub fn with_records(records: Vec<Value>) -> Arc<Self> {
        Self::new(Reply::Records(records))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn ranges(&self) -> Vec<(NaiveDate, NaiveDate)> {
        self.ranges.lock().unwrap().clone()
    }

    pub fn set_reply(&self, reply: Reply) {
        *self.reply.lock().unwrap() = reply;
    }

    fn answer(&self) -> Result<Vec<Value>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.reply.lock().unwrap() {
            Reply::Records(records) => Ok(records.clone()),
            Reply::NotFound => Err(CatalogError::NotFound),
            Reply::Status(status) => Err(CatalogError::Status {
                status: *status,
                body: "upstream failure".to_string(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl CatalogClient for FakeCatalog {
    async fn fetch_by_title(&self, _title: &str) -> Result<Vec<Value>, CatalogError> {
        self.answer()
    }

    async fn fetch_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Value>, CatalogError> {
        self.ranges.lock().unwrap().push((start, end));
        self.answer()
    }
}

pub fn service(store: &Store, catalog: &Arc<FakeCatalog>, enabled: bool) -> DefaultImportService {
    let config = CatalogConfig {
        enabled,
        ..CatalogConfig::default()
    };
    DefaultImportService::new(store.clone(), catalog.clone(), &config)
}
