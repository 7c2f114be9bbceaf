//! Flat-file JSON datastore
//!
//! Each collection is a single JSON array in `<data_dir>/<name>.json`.
//! Reads and writes are whole-file; the store itself provides no
//! partial-write protection, so read-modify-write cycles must be serialized
//! through the [`lock::LockManager`].

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppResult;

pub mod lock;

/// Collection names used by the platform
pub mod collections {
    pub const STOCK: &str = "stock";
    pub const PURCHASE_ORDERS: &str = "purchase_orders";
    pub const TRANSFERS: &str = "transfers";
    pub const ALERTS: &str = "alerts";
    pub const AUDIT_LOG: &str = "audit_log";
    pub const PRODUCTS: &str = "products";
    pub const WAREHOUSES: &str = "warehouses";
}

/// Handle on the data directory holding the collection files
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Create the data directory if it does not exist yet
    pub async fn ensure_data_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        Ok(())
    }

    /// Directory for the lock manager's lock files
    pub fn lock_dir(&self) -> PathBuf {
        self.data_dir.join(".locks")
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }

    /// Read a whole collection. A missing file reads as the empty
    /// collection; unreadable or malformed files fail.
    pub async fn read_collection<T: DeserializeOwned>(&self, name: &str) -> AppResult<Vec<T>> {
        let path = self.collection_path(name);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let items = serde_json::from_str(&raw)?;
        Ok(items)
    }

    /// Overwrite a whole collection
    pub async fn write_collection<T: Serialize>(&self, name: &str, items: &[T]) -> AppResult<()> {
        let path = self.collection_path(name);
        let raw = serde_json::to_string_pretty(items)?;
        tokio::fs::write(&path, raw).await?;
        Ok(())
    }

    /// Root data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Next sequential id for a collection: `max + 1`, or 1 when empty.
///
/// Not safe under concurrent callers without external locking.
pub fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().map_or(1, |max| max + 1)
}

/// Current timestamp, UTC
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Generate a date-scoped reference number, `PREFIX-YYYYMMDD-NNNN`.
///
/// `NNNN` is the smallest unused zero-padded sequence among `existing`
/// references carrying today's prefix. More than 9999 references in one day
/// wraps into collisions; the generator does not guard against it.
pub fn generate_reference_number<'a>(
    prefix: &str,
    date: NaiveDate,
    existing: impl Iterator<Item = &'a str>,
) -> String {
    let day_prefix = format!("{}-{}", prefix, date.format("%Y%m%d"));
    let used: std::collections::HashSet<u32> = existing
        .filter_map(|reference| reference.strip_prefix(&day_prefix))
        .filter_map(|rest| rest.strip_prefix('-'))
        .filter_map(|seq| seq.parse().ok())
        .collect();

    let mut sequence = 1u32;
    while used.contains(&sequence) {
        sequence += 1;
    }
    format!("{}-{:04}", day_prefix, sequence)
}
