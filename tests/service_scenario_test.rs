//! Full lifecycle through the per-entity service layer.
//!
//! Exercises the registry → accessor → repository path end to end with a
//! mock store: create, read, partial update, delete, read-after-delete.

use std::collections::BTreeMap;

use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
use serde_json::json;

use rust_crud_core::{ConnectionRegistry, CrudService, Record, Services};

fn role_row(id: i64, name: &str, description: &str) -> BTreeMap<&'static str, Value> {
    let mut row = BTreeMap::new();
    row.insert("id", Value::from(id));
    row.insert("name", Value::from(name.to_string()));
    row.insert("description", Value::from(description.to_string()));
    row
}

fn record(value: serde_json::Value) -> Record {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn role_lifecycle_matches_the_crud_contract() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            // create RETURNING row with the generated key
            vec![role_row(7, "admin", "full access")],
            // find_one after create
            vec![role_row(7, "admin", "full access")],
            // update existence check
            vec![role_row(7, "admin", "full access")],
            // update RETURNING row
            vec![role_row(7, "superadmin", "full access")],
            // delete existence check
            vec![role_row(7, "superadmin", "full access")],
            // find_one after delete
            Vec::<BTreeMap<&str, Value>>::new(),
        ])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let registry = ConnectionRegistry::with_connection(db);
    let services = Services::from_registry(&registry);
    let roles = services.roles();

    let created = roles
        .create(record(json!({"name": "admin", "description": "full access"})))
        .await;
    assert_eq!(created.status_code, 201);
    let stored = created.data.unwrap();
    assert_eq!(stored["id"], json!(7));

    let found = roles.find_one("7").await;
    assert_eq!(found.status_code, 200);
    assert_eq!(found.data.unwrap(), stored);

    let updated = roles
        .update("7", record(json!({"name": "superadmin"})))
        .await;
    assert_eq!(updated.status_code, 200);
    let updated = updated.data.unwrap();
    assert_eq!(updated["name"], json!("superadmin"));
    assert_eq!(updated["description"], json!("full access"), "untouched field survives");

    let deleted = roles.delete("7").await;
    assert_eq!(deleted.status_code, 200);
    assert!(deleted.data.is_none());

    let gone = roles.find_one("7").await;
    assert_eq!(gone.status_code, 404);
    assert_eq!(gone.message.as_deref(), Some("Not Found"));
}

#[tokio::test]
async fn each_entity_service_queries_its_own_table() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            Vec::<BTreeMap<&str, Value>>::new(),
            Vec::<BTreeMap<&str, Value>>::new(),
        ])
        .into_connection();

    let registry = ConnectionRegistry::with_connection(db.clone());
    let services = Services::from_registry(&registry);

    services.comments().find_all(Record::new()).await;
    services.projects().find_all(Record::new()).await;

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("comments"));
    assert!(log.contains("projects"));
}

#[tokio::test]
async fn mapped_field_names_reach_the_store_as_columns() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
        .into_connection();

    let registry = ConnectionRegistry::with_connection(db.clone());
    let services = Services::from_registry(&registry);

    let res = services
        .tasks()
        .find_all(record(json!({"projectId": "12"})))
        .await;
    assert_eq!(res.status_code, 200);

    let log = format!("{:?}", db.into_transaction_log());
    assert!(log.contains("project_id"), "field name is translated to its column: {log}");
    assert!(!log.contains("projectId"));
}
