//! User service: the generic engine bound to the `users` entity.

use once_cell::sync::Lazy;
use std::sync::Arc;

use super::CrudService;
use crate::domain::EntityDescriptor;
use crate::infra::{ConnectionRegistry, GenericRepository};

static DESCRIPTOR: Lazy<Arc<EntityDescriptor>> = Lazy::new(|| {
    EntityDescriptor::builder("users")
        .field("id")
        .field("username")
        .field("email")
        .field("password")
        .field_mapped("roleId", "role_id")
        .primary_key("id")
        .build()
        .expect("users descriptor is well formed")
});

pub struct UserService {
    repo: GenericRepository,
}

impl UserService {
    pub fn new(registry: &ConnectionRegistry) -> Self {
        Self {
            repo: GenericRepository::new(registry.accessor(&DESCRIPTOR)),
        }
    }
}

impl CrudService for UserService {
    fn repo(&self) -> &GenericRepository {
        &self.repo
    }
}
