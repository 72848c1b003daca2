//! Data access boundary
//!
//! The engine never owns storage. It consumes a narrow read/write
//! interface (`DataAccess`) and treats everything behind it as external:
//! the physical store may be a document database, a graph store, or the
//! in-memory implementation shipped here for tests and embedders.

mod access;
mod errors;
mod memory;

pub use access::DataAccess;
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
