pub mod error;
pub mod firestore;
pub mod memory;
pub mod traits;

pub use error::StoreError;
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use traits::{can_delete, validate_new_review, ProfileStore, ReviewStore};
