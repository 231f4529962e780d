//! Entity descriptors.
//!
//! An [`EntityDescriptor`] is the static description of one record type's
//! storage shape: the logical table identity, the ordered field list with
//! storage column names, and the designated primary-key field. Descriptors
//! are built once at startup, validated on construction, and shared
//! immutably (`Arc`) for the process lifetime. Field names are the only
//! names callers may reference in filters or partial updates; everything
//! else is sieved out before a statement is built.

use std::sync::Arc;

use crate::errors::{AppError, AppResult};

/// One field of an entity: the caller-facing name and its storage column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    name: String,
    column: String,
}

impl FieldDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

/// Static description of one record type's storage shape and primary key.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    identity: String,
    fields: Vec<FieldDef>,
    primary_key: String,
}

impl EntityDescriptor {
    pub fn builder(identity: impl Into<String>) -> EntityDescriptorBuilder {
        EntityDescriptorBuilder {
            identity: identity.into(),
            fields: Vec::new(),
            primary_key: None,
        }
    }

    /// Stable identity: the logical table name, also the accessor cache key.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// The caller-facing name of the primary-key field.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// The storage column the primary key lives in.
    pub fn primary_key_column(&self) -> &str {
        self.field(&self.primary_key)
            .map(FieldDef::column)
            .unwrap_or(&self.primary_key)
    }

    /// Look up a field by caller-facing name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

/// Builder enforcing the descriptor invariants at construction time.
pub struct EntityDescriptorBuilder {
    identity: String,
    fields: Vec<FieldDef>,
    primary_key: Option<String>,
}

impl EntityDescriptorBuilder {
    /// Add a field whose column name equals its caller-facing name.
    pub fn field(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let column = name.clone();
        self.field_mapped(name, column)
    }

    /// Add a field with an explicit storage column name.
    pub fn field_mapped(mut self, name: impl Into<String>, column: impl Into<String>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            column: column.into(),
        });
        self
    }

    /// Designate the primary-key field. Must name a declared field.
    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = Some(name.into());
        self
    }

    pub fn build(self) -> AppResult<Arc<EntityDescriptor>> {
        if self.identity.is_empty() {
            return Err(AppError::descriptor("identity must not be empty"));
        }
        if self.fields.is_empty() {
            return Err(AppError::descriptor(format!(
                "entity '{}' declares no fields",
                self.identity
            )));
        }
        for (i, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() || field.column.is_empty() {
                return Err(AppError::descriptor(format!(
                    "entity '{}' has an empty field or column name",
                    self.identity
                )));
            }
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(AppError::descriptor(format!(
                    "entity '{}' declares field '{}' twice",
                    self.identity, field.name
                )));
            }
        }
        let primary_key = self
            .primary_key
            .ok_or_else(|| {
                AppError::descriptor(format!(
                    "entity '{}' designates no primary key",
                    self.identity
                ))
            })?;
        if !self.fields.iter().any(|f| f.name == primary_key) {
            return Err(AppError::descriptor(format!(
                "entity '{}' primary key '{}' is not in the field list",
                self.identity, primary_key
            )));
        }

        Ok(Arc::new(EntityDescriptor {
            identity: self.identity,
            fields: self.fields,
            primary_key,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_descriptor_with_mapped_columns() {
        let desc = EntityDescriptor::builder("comments")
            .field("id")
            .field("body")
            .field_mapped("taskId", "task_id")
            .primary_key("id")
            .build()
            .unwrap();

        assert_eq!(desc.identity(), "comments");
        assert_eq!(desc.primary_key(), "id");
        assert_eq!(desc.primary_key_column(), "id");
        assert_eq!(desc.field("taskId").unwrap().column(), "task_id");
        assert!(desc.has_field("body"));
        assert!(!desc.has_field("task_id"));
    }

    #[test]
    fn rejects_primary_key_outside_the_field_list() {
        let err = EntityDescriptor::builder("roles")
            .field("name")
            .primary_key("id")
            .build()
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn rejects_duplicate_fields_and_empty_shapes() {
        assert!(EntityDescriptor::builder("roles")
            .field("id")
            .field("id")
            .primary_key("id")
            .build()
            .is_err());
        assert!(EntityDescriptor::builder("roles").build().is_err());
        assert!(EntityDescriptor::builder("")
            .field("id")
            .primary_key("id")
            .build()
            .is_err());
    }

    #[test]
    fn requires_a_designated_primary_key() {
        assert!(EntityDescriptor::builder("roles")
            .field("id")
            .build()
            .is_err());
    }
}
