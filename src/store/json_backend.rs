use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    core::{
        services::{InvestmentService, TransactionService},
        utils::{ensure_dir, PathResolver},
    },
    domain::{
        InvestmentDocument, InvestmentRecord, InvestmentUpdate, NewInvestment, NewTransaction,
        TransactionDocument, TransactionKind, TransactionRecord, UserId,
    },
    errors::{FinanceError, Result},
};

use super::DocumentStore;

const COLLECTION_EXTENSION: &str = "json";
const INVESTMENTS_COLLECTION: &str = "investments";
const TMP_SUFFIX: &str = "tmp";

/// Raw collection file: document id → stored document.
type Collection = BTreeMap<String, Value>;

/// File-backed document store laid out as
/// `<root>/users/<uid>/{expenses,incomes,investments}.json`.
///
/// Clones share one write lock, so every read-modify-write of a collection
/// file runs to completion before the next one starts.
#[derive(Clone, Debug)]
pub struct JsonDocumentStore {
    users_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonDocumentStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        let users_dir = PathResolver::users_dir_in(&root);
        ensure_dir(&users_dir)?;
        Ok(Self {
            users_dir,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn collection_path(&self, user: &UserId, collection: &str) -> PathBuf {
        self.users_dir
            .join(canonical_user(user))
            .join(format!("{}.{}", collection, COLLECTION_EXTENSION))
    }

    fn read_collection(&self, user: &UserId, collection: &str) -> Result<Collection> {
        let path = self.collection_path(user, collection);
        if !path.exists() {
            return Ok(Collection::new());
        }
        let data = fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Collection::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn write_collection(&self, user: &UserId, collection: &str, docs: &Collection) -> Result<()> {
        let path = self.collection_path(user, collection);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(docs)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        if let Err(err) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }

    /// Runs `change` against the current contents of a collection and writes
    /// the result back, holding the write lock for the whole cycle. Nothing is
    /// written when `change` fails.
    fn modify_collection<T>(
        &self,
        user: &UserId,
        collection: &str,
        change: impl FnOnce(&mut Collection) -> Result<T>,
    ) -> Result<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| FinanceError::Storage("store write lock poisoned".into()))?;
        let mut docs = self.read_collection(user, collection)?;
        let outcome = change(&mut docs)?;
        self.write_collection(user, collection, &docs)?;
        Ok(outcome)
    }

    fn remove_document(&self, user: &UserId, collection: &str, id: &str) -> Result<()> {
        self.modify_collection(user, collection, |docs| {
            docs.remove(id)
                .map(|_| ())
                .ok_or_else(|| FinanceError::NotFound(format!("{}/{}", collection, id)))
        })?;
        tracing::info!(user = %user, collection, id, "document deleted");
        Ok(())
    }
}

impl DocumentStore for JsonDocumentStore {
    fn transactions(&self, user: &UserId, kind: TransactionKind) -> Result<Vec<TransactionRecord>> {
        let collection = kind.collection();
        let docs = self.read_collection(user, collection)?;
        Ok(decode_all::<TransactionDocument>(collection, docs)
            .map(|(id, doc)| TransactionRecord::from_document(id, kind, doc))
            .inspect(|record| {
                if !TransactionService::is_consistent(record) {
                    tracing::warn!(
                        collection,
                        id = %record.id,
                        date = %record.date,
                        year = record.year,
                        month = record.month,
                        "stored year/month disagree with the transaction date"
                    );
                }
            })
            .collect())
    }

    fn investments(&self, user: &UserId) -> Result<Vec<InvestmentRecord>> {
        let docs = self.read_collection(user, INVESTMENTS_COLLECTION)?;
        Ok(
            decode_all::<InvestmentDocument>(INVESTMENTS_COLLECTION, docs)
                .map(|(id, doc)| InvestmentRecord::from_document(id, doc))
                .collect(),
        )
    }

    fn insert_transaction(
        &self,
        user: &UserId,
        draft: NewTransaction,
    ) -> Result<TransactionRecord> {
        let collection = draft.kind.collection();
        let record = TransactionService::build_record(draft, new_id(), Utc::now())?;
        let document = serde_json::to_value(record.to_document())?;
        self.modify_collection(user, collection, |docs| {
            docs.insert(record.id.clone(), document);
            Ok(())
        })?;
        tracing::info!(user = %user, collection, id = %record.id, "transaction stored");
        Ok(record)
    }

    fn insert_investment(&self, user: &UserId, draft: NewInvestment) -> Result<InvestmentRecord> {
        let record = InvestmentService::build_record(draft, new_id(), Utc::now())?;
        let document = serde_json::to_value(record.to_document())?;
        self.modify_collection(user, INVESTMENTS_COLLECTION, |docs| {
            docs.insert(record.id.clone(), document);
            Ok(())
        })?;
        tracing::info!(user = %user, id = %record.id, "investment stored");
        Ok(record)
    }

    fn update_investment(
        &self,
        user: &UserId,
        id: &str,
        update: InvestmentUpdate,
    ) -> Result<InvestmentRecord> {
        let updated = self.modify_collection(user, INVESTMENTS_COLLECTION, |docs| {
            let raw = docs.get(id).cloned().ok_or_else(|| {
                FinanceError::NotFound(format!("{}/{}", INVESTMENTS_COLLECTION, id))
            })?;
            let current = InvestmentRecord::from_document(id, serde_json::from_value(raw)?);
            let updated = InvestmentService::apply_update(&current, update)?;
            docs.insert(id.to_string(), serde_json::to_value(updated.to_document())?);
            Ok(updated)
        })?;
        tracing::info!(
            user = %user,
            id,
            principal = updated.initial_amount,
            "investment updated"
        );
        Ok(updated)
    }

    fn delete_transaction(&self, user: &UserId, kind: TransactionKind, id: &str) -> Result<()> {
        self.remove_document(user, kind.collection(), id)
    }

    fn delete_investment(&self, user: &UserId, id: &str) -> Result<()> {
        self.remove_document(user, INVESTMENTS_COLLECTION, id)
    }
}

/// Decodes each document, skipping (and logging) those that do not fit the layout.
fn decode_all<T: DeserializeOwned>(
    collection: &'static str,
    docs: Collection,
) -> impl Iterator<Item = (String, T)> {
    docs.into_iter()
        .filter_map(move |(id, raw)| match serde_json::from_value::<T>(raw) {
            Ok(doc) => Some((id, doc)),
            Err(err) => {
                tracing::warn!(collection, id = %id, error = %err, "skipping malformed document");
                None
            }
        })
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Directory name for a user id. ASCII letters, digits and `-` pass through;
/// every other byte becomes `_` followed by two hex digits, so distinct ids
/// never share a directory. The empty id maps to a bare `_`.
fn canonical_user(user: &UserId) -> String {
    let raw = user.as_str();
    if raw.is_empty() {
        return "_".into();
    }
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' => encoded.push(char::from(byte)),
            _ => encoded.push_str(&format!("_{:02x}", byte)),
        }
    }
    encoded
}

/// Per-write scratch file next to `path`, unique so concurrent writers never
/// share one.
fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(format!(
        "{}.{}.{}",
        COLLECTION_EXTENSION,
        Uuid::new_v4().simple(),
        TMP_SUFFIX
    ));
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
