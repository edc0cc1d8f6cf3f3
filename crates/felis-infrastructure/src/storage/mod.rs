//! Local storage backends for the session store.
//!
//! - `json_file`: durable JSON object file with atomic multi-key writes
//! - `memory`: process-local map, for tests and ephemeral sessions

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
