//! Connection registry: the single live connection and bound accessors.
//!
//! The registry owns at most one [`DatabaseConnection`] per process,
//! established once at startup (or lazily before first use) and never
//! replaced. Per-entity [`BoundAccessor`]s pair an entity descriptor with
//! that connection and are cached write-once-per-key for the process
//! lifetime. If establishing the connection fails the process logs and
//! continues: the registry stays usable, and accessor requests report
//! "no connection" by returning `None`.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use sea_orm::{Database as SeaDatabase, DatabaseConnection};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::domain::EntityDescriptor;
use crate::errors::AppResult;

/// An entity descriptor bound to the live connection, cached per entity.
pub struct BoundAccessor {
    descriptor: Arc<EntityDescriptor>,
    connection: DatabaseConnection,
}

impl BoundAccessor {
    pub fn new(descriptor: Arc<EntityDescriptor>, connection: DatabaseConnection) -> Self {
        Self {
            descriptor,
            connection,
        }
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }
}

/// Process-scoped registry for the connection and accessor cache.
///
/// Constructed once at startup and passed explicitly to every component
/// that needs it; there is no ambient global lookup.
pub struct ConnectionRegistry {
    connection: OnceCell<DatabaseConnection>,
    // Serializes concurrent connect() calls so only one dial happens.
    connect_guard: Mutex<()>,
    accessors: RwLock<HashMap<String, Arc<BoundAccessor>>>,
}

impl ConnectionRegistry {
    /// A registry with no connection yet; call [`connect`](Self::connect)
    /// before requesting accessors.
    pub fn new() -> Self {
        Self {
            connection: OnceCell::new(),
            connect_guard: Mutex::new(()),
            accessors: RwLock::new(HashMap::new()),
        }
    }

    /// A registry around an already-established connection (tests and
    /// embedding scenarios).
    pub fn with_connection(connection: DatabaseConnection) -> Self {
        let registry = Self::new();
        let _ = registry.connection.set(connection);
        registry
    }

    /// Establish the single connection. Idempotent: a second call reuses
    /// the live connection instead of opening another one. On failure the
    /// registry remains usable but every accessor request returns `None`.
    pub async fn connect(&self, config: &Config) -> AppResult<()> {
        let _guard = self.connect_guard.lock().await;
        if self.connection.get().is_some() {
            return Ok(());
        }

        match SeaDatabase::connect(&config.db.database_url()).await {
            Ok(connection) => {
                tracing::info!(
                    host = %config.db.host,
                    dbname = %config.db.dbname,
                    "connected to the database"
                );
                let _ = self.connection.set(connection);
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "error connecting to the database");
                Err(err.into())
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.get().is_some()
    }

    /// The cached accessor for this descriptor's identity, binding and
    /// caching it on first use. Returns `None` while no connection exists;
    /// callers treat that as service-unavailable.
    ///
    /// Safe under concurrent first-use: the cache is write-once-per-key,
    /// and a lost race simply observes the winner's entry.
    pub fn accessor(&self, descriptor: &Arc<EntityDescriptor>) -> Option<Arc<BoundAccessor>> {
        let connection = self.connection.get()?;

        if let Some(found) = self
            .accessors
            .read()
            .expect("accessor cache lock poisoned")
            .get(descriptor.identity())
        {
            return Some(found.clone());
        }

        let mut cache = self
            .accessors
            .write()
            .expect("accessor cache lock poisoned");
        let entry = cache
            .entry(descriptor.identity().to_string())
            .or_insert_with(|| {
                Arc::new(BoundAccessor::new(descriptor.clone(), connection.clone()))
            });
        Some(entry.clone())
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn role_descriptor() -> Arc<EntityDescriptor> {
        EntityDescriptor::builder("roles")
            .field("id")
            .field("name")
            .primary_key("id")
            .build()
            .unwrap()
    }

    #[test]
    fn accessor_is_none_without_a_connection() {
        let registry = ConnectionRegistry::new();
        assert!(!registry.is_connected());
        assert!(registry.accessor(&role_descriptor()).is_none());
    }

    #[test]
    fn accessor_is_cached_per_entity_identity() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let registry = ConnectionRegistry::with_connection(db);
        let descriptor = role_descriptor();

        let first = registry.accessor(&descriptor).unwrap();
        let second = registry.accessor(&descriptor).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn distinct_entities_get_distinct_accessors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let registry = ConnectionRegistry::with_connection(db);

        let roles = registry.accessor(&role_descriptor()).unwrap();
        let tasks = registry
            .accessor(
                &EntityDescriptor::builder("tasks")
                    .field("id")
                    .field("title")
                    .primary_key("id")
                    .build()
                    .unwrap(),
            )
            .unwrap();

        assert_eq!(roles.descriptor().identity(), "roles");
        assert_eq!(tasks.descriptor().identity(), "tasks");
    }
}
