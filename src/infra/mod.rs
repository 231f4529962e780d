//! Infrastructure layer - External systems integration
//!
//! This module handles the store-facing concerns: the connection registry
//! with its bound-accessor cache, and the generic repository engine.

pub mod db;
pub mod repositories;

pub use db::{BoundAccessor, ConnectionRegistry};
pub use repositories::GenericRepository;
