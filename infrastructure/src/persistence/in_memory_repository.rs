use crate::search::matches_search_request;
use application::{DocumentRepository, SearchRequest};
use dashmap::DashMap;
use domain::{Document, DocumentId};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Document storage backed by a concurrent map.
///
/// Documents are copied on the way in and on the way out; nothing returned
/// aliases what is stored.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    // Document ID -> Document
    store: Arc<DashMap<DocumentId, Arc<Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self, document))]
    fn save(&self, document: &Document) {
        let Some(id) = document.id.clone() else {
            warn!("Refusing to store a document without an id");
            return;
        };
        debug!(doc_id = %id, "Saving document to in-memory store");
        self.store.insert(id, Arc::new(document.clone()));
    }

    #[instrument(skip(self))]
    fn get(&self, id: &DocumentId) -> Option<Document> {
        debug!(doc_id = %id, "Getting document from in-memory store");
        self.store.get(id).map(|doc_ref| (**doc_ref).clone())
    }

    #[instrument(skip(self, request))]
    fn search(&self, request: &SearchRequest) -> Vec<Document> {
        let hits: Vec<Document> = self
            .store
            .iter()
            .filter(|entry| matches_search_request(entry.value(), request))
            .map(|entry| (**entry.value()).clone())
            .collect();
        debug!(
            scanned = self.store.len(),
            hits = hits.len(),
            "In-memory search finished."
        );
        hits
    }

    fn count(&self) -> usize {
        self.store.len()
    }
}
