//! Project service: the generic engine bound to the `projects` entity.

use once_cell::sync::Lazy;
use std::sync::Arc;

use super::CrudService;
use crate::domain::EntityDescriptor;
use crate::infra::{ConnectionRegistry, GenericRepository};

static DESCRIPTOR: Lazy<Arc<EntityDescriptor>> = Lazy::new(|| {
    EntityDescriptor::builder("projects")
        .field("id")
        .field("name")
        .field("description")
        .field_mapped("ownerId", "owner_id")
        .primary_key("id")
        .build()
        .expect("projects descriptor is well formed")
});

pub struct ProjectService {
    repo: GenericRepository,
}

impl ProjectService {
    pub fn new(registry: &ConnectionRegistry) -> Self {
        Self {
            repo: GenericRepository::new(registry.accessor(&DESCRIPTOR)),
        }
    }
}

impl CrudService for ProjectService {
    fn repo(&self) -> &GenericRepository {
        &self.repo
    }
}
