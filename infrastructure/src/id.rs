use application::IdGenerator;
use domain::DocumentId;
use uuid::Uuid;

/// Generates random (v4) UUIDs in hyphenated form. No ordering between ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> DocumentId {
        DocumentId::new(Uuid::new_v4().to_string())
    }
}
