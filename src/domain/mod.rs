//! Domain layer - Core data model
//!
//! Contains the entity descriptor (the storage shape of one record type)
//! and the record representation shared by every component. The domain
//! layer knows nothing about the store driver.

pub mod descriptor;

pub use descriptor::{EntityDescriptor, EntityDescriptorBuilder, FieldDef};

/// A record as the route layer hands it in and as rows come back:
/// a mapping from caller-facing field name to JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;
