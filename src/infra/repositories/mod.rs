//! Repository layer - Data access abstraction
//!
//! One generic repository implementation serves every entity shape,
//! parameterized by an entity descriptor and a bound accessor.

mod base;

pub use base::GenericRepository;
