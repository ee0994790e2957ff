//! In-memory document store.
//!
//! Used for dry runs and tests. Filters support top-level equality and the
//! comparison operators the planner emits (`$gte`, `$lte`, `$gt`, `$lt`,
//! `$eq`, `$ne`); updates support `$set`.

use crate::client::{ClientError, CollectionHandle, DocumentStore};
use async_trait::async_trait;
use bson::{Bson, Document};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

type Documents = Arc<Mutex<Vec<Document>>>;

/// Store holding every collection in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    connected: bool,
    collections: Mutex<HashMap<(String, String), Documents>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that is already connected.
    pub fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    /// Number of documents currently in `database.name`.
    pub fn document_count(&self, name: &str, database: &str) -> usize {
        let collections = lock(&self.collections);
        collections
            .get(&(database.to_string(), name.to_string()))
            .map(|docs| lock(docs).len())
            .unwrap_or(0)
    }

    /// Copy of every document in `database.name`, in insertion order.
    pub fn documents(&self, name: &str, database: &str) -> Vec<Document> {
        let collections = lock(&self.collections);
        collections
            .get(&(database.to_string(), name.to_string()))
            .map(|docs| lock(docs).clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn connect(&mut self, _endpoint: &str) -> Result<(), ClientError> {
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), ClientError> {
        self.connected = false;
        Ok(())
    }

    fn collection(
        &self,
        name: &str,
        database: &str,
    ) -> Result<Arc<dyn CollectionHandle>, ClientError> {
        if !self.connected {
            return Err(ClientError::NotConnected);
        }
        let mut collections = lock(&self.collections);
        let documents = collections
            .entry((database.to_string(), name.to_string()))
            .or_default()
            .clone();
        Ok(Arc::new(MemoryCollection { documents }))
    }
}

/// Handle to one in-memory collection.
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    documents: Documents,
}

#[async_trait]
impl CollectionHandle for MemoryCollection {
    async fn find(&self, filter: Document) -> Result<u64, ClientError> {
        let documents = lock(&self.documents);
        Ok(documents.iter().filter(|d| matches(d, &filter)).count() as u64)
    }

    async fn insert_one(&self, document: Document) -> Result<u64, ClientError> {
        lock(&self.documents).push(document);
        Ok(1)
    }

    async fn update_many(&self, filter: Document, update: Document) -> Result<u64, ClientError> {
        let set = match update.get("$set") {
            Some(Bson::Document(set)) => set.clone(),
            _ => {
                return Err(ClientError::Operation(
                    "update document must use $set".to_string(),
                ))
            }
        };

        let mut documents = lock(&self.documents);
        let mut modified = 0;
        for document in documents.iter_mut().filter(|d| matches(d, &filter)) {
            for (key, value) in &set {
                document.insert(key.clone(), value.clone());
            }
            modified += 1;
        }
        Ok(modified)
    }

    async fn delete_many(&self, filter: Document) -> Result<u64, ClientError> {
        let mut documents = lock(&self.documents);
        let before = documents.len();
        documents.retain(|d| !matches(d, &filter));
        Ok((before - documents.len()) as u64)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Whether `document` satisfies every condition in `filter`.
fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, condition)| {
        let value = document.get(key);
        match condition {
            Bson::Document(ops) if is_operator_document(ops) => ops
                .iter()
                .all(|(op, operand)| apply_operator(op, value, operand)),
            expected => value.is_some_and(|v| values_equal(v, expected)),
        }
    })
}

fn is_operator_document(document: &Document) -> bool {
    !document.is_empty() && document.keys().all(|k| k.starts_with('$'))
}

fn apply_operator(op: &str, value: Option<&Bson>, operand: &Bson) -> bool {
    let ordering = value.and_then(|v| compare(v, operand));
    match op {
        "$eq" => value.is_some_and(|v| values_equal(v, operand)),
        "$ne" => !value.is_some_and(|v| values_equal(v, operand)),
        "$gt" => ordering == Some(Ordering::Greater),
        "$gte" => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        "$lt" => ordering == Some(Ordering::Less),
        "$lte" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        _ => false,
    }
}

/// Numbers compare by value across Int32, Int64 and Double.
fn values_equal(left: &Bson, right: &Bson) -> bool {
    match (as_f64(left), as_f64(right)) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

fn compare(left: &Bson, right: &Bson) -> Option<Ordering> {
    match (left, right) {
        (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
        (Bson::DateTime(a), Bson::DateTime(b)) => Some(a.cmp(b)),
        _ => as_f64(left)?.partial_cmp(&as_f64(right)?),
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}
