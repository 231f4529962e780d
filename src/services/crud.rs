//! Shared CRUD surface for per-entity services.
//!
//! Per-entity services hold a [`GenericRepository`] and expose nothing
//! beyond it; the trait's default methods delegate every operation, so an
//! implementor only supplies the repository accessor.

use async_trait::async_trait;

use crate::domain::Record;
use crate::errors::AppResult;
use crate::infra::GenericRepository;
use crate::types::ApiResponse;

#[async_trait]
pub trait CrudService: Send + Sync {
    /// The bound repository engine for this entity.
    fn repo(&self) -> &GenericRepository;

    /// Persist a new record.
    async fn create(&self, record: Record) -> ApiResponse<Record> {
        self.repo().create(&record).await
    }

    /// Point lookup by primary key.
    async fn find_one(&self, id: &str) -> ApiResponse<Record> {
        self.repo().find_one(id).await
    }

    /// Partial update keyed by primary key.
    async fn update(&self, id: &str, changes: Record) -> ApiResponse<Record> {
        self.repo().update(id, &changes).await
    }

    /// Equality-filtered listing; an empty filter map lists everything.
    async fn find_all(&self, filters: Record) -> ApiResponse<Vec<Record>> {
        self.repo().find_all(&filters).await
    }

    /// Batch lookup by primary keys.
    async fn find_by_ids(&self, ids: &[String]) -> ApiResponse<Vec<Record>> {
        self.repo().find_by_ids(ids).await
    }

    /// Delete by primary key.
    async fn delete(&self, id: &str) -> ApiResponse<()> {
        self.repo().delete(id).await
    }

    /// Raw-predicate escape hatch.
    async fn custom_query(&self, predicate: &str) -> AppResult<Vec<Record>> {
        self.repo().custom_query(predicate).await
    }
}
