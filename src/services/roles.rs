//! Role service: the generic engine bound to the `roles` entity.

use once_cell::sync::Lazy;
use std::sync::Arc;

use super::CrudService;
use crate::domain::EntityDescriptor;
use crate::infra::{ConnectionRegistry, GenericRepository};

static DESCRIPTOR: Lazy<Arc<EntityDescriptor>> = Lazy::new(|| {
    EntityDescriptor::builder("roles")
        .field("id")
        .field("name")
        .field("description")
        .primary_key("id")
        .build()
        .expect("roles descriptor is well formed")
});

pub struct RoleService {
    repo: GenericRepository,
}

impl RoleService {
    /// Bind to the registry's connection. Soft-fails: with no connection
    /// established every operation resolves to a 503 envelope.
    pub fn new(registry: &ConnectionRegistry) -> Self {
        Self {
            repo: GenericRepository::new(registry.accessor(&DESCRIPTOR)),
        }
    }
}

impl CrudService for RoleService {
    fn repo(&self) -> &GenericRepository {
        &self.repo
    }
}
