//! Schema registry
//!
//! Runtime type-tag → validation-rule lookup. The tag universe is
//! intentionally open: new record types appear without code changes, so
//! there is no closed enum of tags anywhere in this module. The table is
//! seeded from the built-in ontology tables at startup, optionally
//! extended from declarative schema files on disk, and accepts further
//! registrations at runtime.

pub mod builtin;
mod errors;
mod loader;
mod registry;
mod types;

pub use errors::{RegistryError, RegistryResult};
pub use loader::SchemaFileLoader;
pub use registry::{SchemaInfo, SchemaRegistry};
pub use types::{Predicate, SchemaDef, TypeSchema};
