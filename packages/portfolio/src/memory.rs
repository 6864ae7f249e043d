use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::PersistError;
use crate::models::{DocumentRef, FieldValue, NewDocument};
use crate::services::DocumentStore;

/// A document as the in-memory store holds it.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredDocument {
    pub reference: DocumentRef,
    pub fields: BTreeMap<String, FieldValue>,
    /// Logical server clock at write time; stands in for every
    /// `ServerTimestamp` field of the document.
    pub written_at: u64,
}

/// In-memory DocumentStore for tests and offline previews.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<Vec<StoredDocument>>>,
    clock: Arc<AtomicU64>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every write fails with a network error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of all documents in write order.
    pub fn documents(&self) -> Vec<StoredDocument> {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn count(&self, collection: &str) -> usize {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|d| d.reference.collection == collection)
            .count()
    }
}

impl DocumentStore for MemoryStore {
    async fn create(&self, doc: NewDocument) -> Result<DocumentRef, PersistError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PersistError::Network("store unavailable".to_string()));
        }
        let written_at = self.clock.fetch_add(1, Ordering::SeqCst) + 1;
        let reference = DocumentRef {
            collection: doc.collection.to_string(),
            id: format!("doc-{written_at}"),
        };
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(StoredDocument {
                reference: reference.clone(),
                fields: doc.fields,
                written_at,
            });
        Ok(reference)
    }
}
