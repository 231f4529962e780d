//! Comment service: the generic engine bound to the `comments` entity.

use once_cell::sync::Lazy;
use std::sync::Arc;

use super::CrudService;
use crate::domain::EntityDescriptor;
use crate::infra::{ConnectionRegistry, GenericRepository};

static DESCRIPTOR: Lazy<Arc<EntityDescriptor>> = Lazy::new(|| {
    EntityDescriptor::builder("comments")
        .field("id")
        .field("body")
        .field_mapped("taskId", "task_id")
        .field_mapped("authorId", "author_id")
        .field_mapped("createdAt", "created_at")
        .primary_key("id")
        .build()
        .expect("comments descriptor is well formed")
});

pub struct CommentService {
    repo: GenericRepository,
}

impl CommentService {
    pub fn new(registry: &ConnectionRegistry) -> Self {
        Self {
            repo: GenericRepository::new(registry.accessor(&DESCRIPTOR)),
        }
    }
}

impl CrudService for CommentService {
    fn repo(&self) -> &GenericRepository {
        &self.repo
    }
}
