//! Service container - centralized construction of per-entity services.
//!
//! Builds every per-entity service from one registry handle. Construction
//! never fails: services built before a connection exists simply resolve
//! every operation to a connection-unavailable envelope.

use super::{CommentService, ProjectService, RoleService, TaskService, UserService};
use crate::infra::ConnectionRegistry;

pub struct Services {
    roles: RoleService,
    tasks: TaskService,
    users: UserService,
    comments: CommentService,
    projects: ProjectService,
}

impl Services {
    pub fn from_registry(registry: &ConnectionRegistry) -> Self {
        Self {
            roles: RoleService::new(registry),
            tasks: TaskService::new(registry),
            users: UserService::new(registry),
            comments: CommentService::new(registry),
            projects: ProjectService::new(registry),
        }
    }

    pub fn roles(&self) -> &RoleService {
        &self.roles
    }

    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn comments(&self) -> &CommentService {
        &self.comments
    }

    pub fn projects(&self) -> &ProjectService {
        &self.projects
    }
}
