//! Task service: the generic engine bound to the `tasks` entity.

use once_cell::sync::Lazy;
use std::sync::Arc;

use super::CrudService;
use crate::domain::EntityDescriptor;
use crate::infra::{ConnectionRegistry, GenericRepository};

static DESCRIPTOR: Lazy<Arc<EntityDescriptor>> = Lazy::new(|| {
    EntityDescriptor::builder("tasks")
        .field("id")
        .field("title")
        .field("description")
        .field("status")
        .field_mapped("projectId", "project_id")
        .field_mapped("assigneeId", "assignee_id")
        .primary_key("id")
        .build()
        .expect("tasks descriptor is well formed")
});

pub struct TaskService {
    repo: GenericRepository,
}

impl TaskService {
    pub fn new(registry: &ConnectionRegistry) -> Self {
        Self {
            repo: GenericRepository::new(registry.accessor(&DESCRIPTOR)),
        }
    }
}

impl CrudService for TaskService {
    fn repo(&self) -> &GenericRepository {
        &self.repo
    }
}
