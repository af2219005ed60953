#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{NaiveDate, TimeZone, Utc};
use finance_core::domain::{TransactionKind, TransactionRecord};
use finance_core::store::JsonDocumentStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Store backed by a unique directory for each test.
pub fn setup_store() -> JsonDocumentStore {
    JsonDocumentStore::new(Some(temp_base())).expect("create json document store")
}

pub fn record(
    id: &str,
    kind: TransactionKind,
    value: f64,
    date: (i32, u32, u32),
    category: Option<&str>,
    created_secs: Option<i64>,
) -> TransactionRecord {
    let (year, month, day) = date;
    TransactionRecord {
        id: id.to_string(),
        kind,
        description: format!("{} description", id),
        value,
        date: NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
        year,
        month,
        category: category.map(str::to_string),
        created_at: created_secs.and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
    }
}

pub fn expense(id: &str, value: f64, date: (i32, u32, u32), category: &str) -> TransactionRecord {
    record(
        id,
        TransactionKind::Expense,
        value,
        date,
        Some(category),
        None,
    )
}

pub fn income(id: &str, value: f64, date: (i32, u32, u32)) -> TransactionRecord {
    record(id, TransactionKind::Income, value, date, None, None)
}
