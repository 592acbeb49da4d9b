// Adapters layer: concrete repository implementations behind the domain ports.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::{InMemoryStore, StoreData};
