//! `slumber-storage`: local key/value persistence boundary.
//!
//! This is the storefront's stand-in for browser local storage: string keys
//! mapped to string values, written synchronously. Nothing here knows about
//! carts; callers own their serialization format.

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use store::KeyValueStore;
