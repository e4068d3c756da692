pub mod store;
pub use store::{Collection, DocumentStore, StoredDocument};
pub mod pg_store;
pub use pg_store::PgDocumentStore;
pub mod memory_store;
pub use memory_store::MemoryDocumentStore;
pub mod repository;
pub use repository::{Document, Repository};
