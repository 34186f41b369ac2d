//! Test helpers shared by unit and integration tests.

pub mod mock_store;

pub use mock_store::MemoryObjectStore;
