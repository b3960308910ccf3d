// Module declarations
pub mod id;
pub mod persistence;
pub mod search;

// Re-export all implementations
pub use id::UuidGenerator;
pub use persistence::InMemoryDocumentRepository;
