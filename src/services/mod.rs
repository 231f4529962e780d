//! Per-entity services.
//!
//! Each service binds the generic repository engine to one entity
//! descriptor at construction time and exposes no behavior beyond the
//! engine's operations. The container builds all of them from one
//! registry handle.

mod comments;
pub mod container;
mod crud;
mod projects;
mod roles;
mod tasks;
mod users;

pub use comments::CommentService;
pub use container::Services;
pub use crud::CrudService;
pub use projects::ProjectService;
pub use roles::RoleService;
pub use tasks::TaskService;
pub use users::UserService;
