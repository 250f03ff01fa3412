// Practice record storage
// Both backends hand out fully materialized rows; the engine never queries them.

mod db;
mod error;
mod memory;
mod queries;
mod schema;
mod storage;

// Public API
pub use db::Database;
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use schema::SCHEMA_VERSION;
pub use storage::Storage;
