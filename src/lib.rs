//! Generic data-access core for relational entities.
//!
//! One repository engine serves an open set of record shapes: each entity
//! is described at runtime by an [`EntityDescriptor`], bound to the single
//! process-wide database connection through the [`ConnectionRegistry`],
//! and driven through the [`GenericRepository`] CRUD engine. Every
//! operation resolves to a uniform [`ApiResponse`] envelope that an outer
//! transport layer maps directly to response codes.
//!
//! # Architecture Layers
//!
//! - **config**: startup configuration document and constants
//! - **domain**: entity descriptors and the record representation
//! - **infra**: connection registry, bound accessors, repository engine
//! - **services**: thin per-entity bindings of the engine
//! - **types**: the shared response envelope
//! - **errors**: centralized error handling

pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{EntityDescriptor, Record};
pub use errors::{AppError, AppResult};
pub use infra::{BoundAccessor, ConnectionRegistry, GenericRepository};
pub use services::{CrudService, Services};
pub use types::ApiResponse;

/// Initialize the tracing subscriber. Verbose mode raises the default
/// level to debug; otherwise `RUST_LOG` decides, defaulting to info.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
