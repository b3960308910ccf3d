use domain::{Document, DocumentId, Timestamp};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use sysinfo::{MemoryRefreshKind, Pid, System};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

// --- Application Errors ---
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

// --- Request Models (DTOs) ---

/// Search criteria. Each field is optional; an absent or empty list places no
/// constraint on its dimension. All present constraints must hold.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchRequest {
    /// Matches if the title starts with any of these.
    pub title_prefixes: Option<Vec<String>>,
    /// Matches if the content contains every one of these.
    pub contains_contents: Option<Vec<String>>,
    /// Matches if the author id is one of these.
    pub author_ids: Option<Vec<String>>,
    /// Inclusive lower bound on `created`.
    pub created_from: Option<Timestamp>,
    /// Inclusive upper bound on `created`.
    pub created_to: Option<Timestamp>,
}

// --- Infrastructure Interfaces (Traits) ---

/// Backing storage for documents, keyed by id.
///
/// Implementations own their records: whatever goes in through `save` is
/// copied, and everything handed back is a fresh copy.
pub trait DocumentRepository: Send + Sync {
    /// Inserts or fully replaces the document under its id.
    fn save(&self, document: &Document);
    /// Retrieves a document by its ID.
    fn get(&self, id: &DocumentId) -> Option<Document>;
    /// Returns every stored document satisfying the request, in storage order.
    fn search(&self, request: &SearchRequest) -> Vec<Document>;
    /// Number of stored documents.
    fn count(&self) -> usize;
    /// Saves multiple documents in order.
    #[instrument(skip(self, documents))]
    fn save_batch(&self, documents: &[Document]) {
        debug!(count = documents.len(), "Saving batch via default iteration");
        for doc in documents {
            self.save(doc);
        }
    }
}

/// Source of fresh document identifiers.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> DocumentId;
}

// --- Application Services ---

/// Upsert, lookup and search over documents.
///
/// Assigns identifiers to documents saved without one and never changes an
/// identifier that is already present. None of the operations fail.
#[derive(Clone)]
pub struct DocumentStore {
    repository: Arc<dyn DocumentRepository>,
    id_generator: Arc<dyn IdGenerator>,
}

impl DocumentStore {
    pub fn new(repository: Arc<dyn DocumentRepository>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            repository,
            id_generator,
        }
    }

    /// Saves a copy of `document`, generating an id if it has none.
    /// An existing document with the same id is replaced wholesale.
    #[instrument(skip(self, document), fields(doc_id = ?document.id))]
    pub fn save(&self, document: &Document) -> Document {
        let stored = self.with_assigned_id(document);
        self.repository.save(&stored);
        info!(doc_id = ?stored.id, "Document saved");
        stored
    }

    /// Saves every document in order, returning the saved copies.
    #[instrument(skip(self, documents), fields(batch_size = documents.len()))]
    pub fn save_batch(&self, documents: &[Document]) -> Vec<Document> {
        if documents.is_empty() {
            warn!("Received an empty batch.");
            return Vec::new();
        }
        let prepared: Vec<Document> = documents
            .iter()
            .map(|document| self.with_assigned_id(document))
            .collect();
        self.repository.save_batch(&prepared);
        info!(count = prepared.len(), "Document batch saved");
        prepared
    }

    /// Copy of `document` carrying a freshly generated id if it had none.
    fn with_assigned_id(&self, document: &Document) -> Document {
        let mut stored = document.clone();
        if stored.id.is_none() {
            let id = self.id_generator.generate();
            debug!(doc_id = %id, "Assigned generated id to document");
            stored.id = Some(id);
        }
        stored
    }

    #[instrument(skip(self, request))]
    pub fn search(&self, request: &SearchRequest) -> Vec<Document> {
        debug!(?request, "Searching documents");
        let results = self.repository.search(request);
        info!(hits = results.len(), "Search finished");
        results
    }

    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: &str) -> Option<Document> {
        let found = self.repository.get(&DocumentId::new(id));
        if found.is_none() {
            debug!(doc_id = %id, "Document not found");
        }
        found
    }

    /// Like [`find_by_id`](Self::find_by_id), but reports absence as an error.
    pub fn get(&self, id: &str) -> Result<Document, ApplicationError> {
        self.find_by_id(id)
            .ok_or_else(|| ApplicationError::NotFound(id.to_string()))
    }

    pub fn count(&self) -> usize {
        self.repository.count()
    }
}

// --- Stats ---

#[derive(Serialize, Debug)]
pub struct MemoryStats {
    total_bytes: u64,
    used_bytes: u64,
    available_bytes: u64,
    process_used_bytes: u64,
}

#[derive(Serialize, Debug)]
pub struct EngineStats {
    pub total_documents: usize,
}

/// Response for the /stats endpoint.
#[derive(Serialize, Debug)]
pub struct StatsResponse {
    pub memory: MemoryStats,
    pub engine: EngineStats,
}

pub struct StatsService {
    store: DocumentStore,
}

impl StatsService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn get_stats(&self) -> Result<StatsResponse, ApplicationError> {
        info!("Gathering engine and system statistics");

        let engine = EngineStats {
            total_documents: self.store.count(),
        };
        debug!("Engine stats gathered: {:?}", engine);

        // sysinfo refreshes are blocking
        let memory = tokio::task::spawn_blocking(|| {
            let mut sys = System::new_all();
            sys.refresh_memory_specifics(MemoryRefreshKind::everything());

            let current_pid = Pid::from(std::process::id() as usize);
            let process_memory = sys.process(current_pid).map_or(0, |p| p.memory());

            MemoryStats {
                total_bytes: sys.total_memory(),
                used_bytes: sys.used_memory(),
                available_bytes: sys.available_memory(),
                process_used_bytes: process_memory,
            }
        })
        .await
        .map_err(|e| {
            error!("System stat gathering task failed: {}", e);
            ApplicationError::InfrastructureError(format!(
                "System stat gathering task failed: {}",
                e
            ))
        })?;
        debug!("Memory stats gathered: {:?}", memory);

        Ok(StatsResponse { memory, engine })
    }
}
