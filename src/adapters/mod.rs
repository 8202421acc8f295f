//! Adapters layer: Concrete implementations of ports.
//!
//! - `memory`: in-process assessment store
//! - `sanitize`: identifier/credential filtering for logs

pub mod memory;
pub mod sanitize;

// Re-export storage error for lib.rs
pub use memory::{InMemoryStore, StorageError};
