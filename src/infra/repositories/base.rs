//! Generic repository engine.
//!
//! One CRUD implementation for any record shape, parameterized entirely by
//! the [`EntityDescriptor`] carried inside a [`BoundAccessor`]. Statements
//! are assembled with the `sea_query` builder using runtime table and
//! column identifiers, and every caller-supplied value is bound as a
//! parameter, never interpolated into the SQL text. Field names coming
//! from callers are sieved against the descriptor before they reach a
//! statement.
//!
//! Every operation resolves to an [`ApiResponse`] envelope; expected
//! conditions (not-found, conflict, invalid data, store failure) are
//! statuses, not `Err`s. The engine itself is stateless and never
//! retries.

use std::sync::Arc;

use sea_orm::sea_query::{Alias, Asterisk, Expr, ExprTrait, Query, SimpleExpr, Value};
use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, JsonValue, QueryResult, SqlErr, Statement};

use crate::domain::{EntityDescriptor, FieldDef, Record};
use crate::errors::{AppError, AppResult};
use crate::infra::db::BoundAccessor;
use crate::types::ApiResponse;

/// The generic CRUD engine for one entity.
///
/// Built from the accessor the [`ConnectionRegistry`] hands out. When the
/// registry had no connection the accessor is absent and every operation
/// resolves to a 503 envelope instead of aborting construction.
///
/// [`ConnectionRegistry`]: crate::infra::db::ConnectionRegistry
pub struct GenericRepository {
    accessor: Option<Arc<BoundAccessor>>,
}

impl GenericRepository {
    pub fn new(accessor: Option<Arc<BoundAccessor>>) -> Self {
        Self { accessor }
    }

    fn accessor(&self) -> AppResult<&BoundAccessor> {
        self.accessor
            .as_deref()
            .ok_or(AppError::ConnectionUnavailable)
    }

    /// Persist a new record built from the descriptor-known fields of the
    /// input. 201 with the stored row (including store-generated fields),
    /// 409 with the store's detail on a uniqueness violation, 500 on any
    /// other store failure.
    pub async fn create(&self, record: &Record) -> ApiResponse<Record> {
        let accessor = match self.accessor() {
            Ok(a) => a,
            Err(err) => return ApiResponse::failure(err),
        };
        let descriptor = accessor.descriptor();

        let mut insert = Query::insert();
        insert.into_table(Alias::new(descriptor.identity()));

        let mut columns = Vec::new();
        let mut values = Vec::new();
        for field in descriptor.fields() {
            if let Some(value) = record.get(field.name()) {
                columns.push(Alias::new(field.column()));
                values.push(SimpleExpr::from(bind_value(value)));
            }
        }
        if columns.is_empty() {
            // A record with no recognized fields still inserts a row of
            // store defaults (generated key, timestamps).
            insert.or_default_values();
        } else {
            insert.columns(columns);
            if let Err(err) = insert.values(values) {
                return ApiResponse::error(500, err.to_string());
            }
        }
        insert.returning_all();

        let statement = DbBackend::Postgres.build(&insert);
        match accessor.connection().query_one_raw(statement).await {
            Ok(Some(row)) => match decode_row(&row) {
                Ok(stored) => ApiResponse::created(stored),
                Err(err) => ApiResponse::error(500, err.to_string()),
            },
            Ok(None) => ApiResponse::error(500, "insert returned no row"),
            Err(err) => match unique_violation(&err) {
                Some(detail) => ApiResponse::error(409, detail),
                None => ApiResponse::error(500, err.to_string()),
            },
        }
    }

    /// Point lookup by primary key. 200 with the record, 404 "Not Found",
    /// or 500 on store failure.
    pub async fn find_one(&self, id: &str) -> ApiResponse<Record> {
        let accessor = match self.accessor() {
            Ok(a) => a,
            Err(err) => return ApiResponse::failure(err),
        };
        let descriptor = accessor.descriptor();

        let mut select = Query::select();
        select
            .column(Asterisk)
            .from(Alias::new(descriptor.identity()))
            .and_where(primary_key_matches(descriptor, id));

        let statement = DbBackend::Postgres.build(&select);
        match accessor.connection().query_one_raw(statement).await {
            Ok(Some(row)) => match decode_row(&row) {
                Ok(record) => ApiResponse::ok(record),
                Err(err) => ApiResponse::error(500, err.to_string()),
            },
            Ok(None) => ApiResponse::not_found(),
            Err(err) => ApiResponse::error(500, err.to_string()),
        }
    }

    /// Two-phase partial update. Phase 1 is a `find_one` existence check;
    /// its 404 is returned unchanged and no write is issued. Phase 2
    /// sieves the input down to descriptor-known fields (unknown fields
    /// are silently dropped, never forwarded to the store) and applies a
    /// parameterized update keyed by the primary key, asking for the
    /// post-update row in the same statement. At least one affected row
    /// yields 200 with the updated record; zero recognized fields or zero
    /// affected rows yield 400 "Invalid Data".
    pub async fn update(&self, id: &str, changes: &Record) -> ApiResponse<Record> {
        let existing = self.find_one(id).await;
        if existing.status_code == 404 {
            return existing;
        }

        let accessor = match self.accessor() {
            Ok(a) => a,
            Err(err) => return ApiResponse::failure(err),
        };
        let descriptor = accessor.descriptor();

        let assignments: Vec<(&FieldDef, &JsonValue)> = descriptor
            .fields()
            .iter()
            .filter_map(|field| changes.get(field.name()).map(|value| (field, value)))
            .collect();
        if assignments.is_empty() {
            // Zero recognized columns: the store would report zero
            // affected rows, so answer that outcome directly.
            return ApiResponse::invalid_data();
        }

        let mut update = Query::update();
        update.table(Alias::new(descriptor.identity()));
        for (field, value) in assignments {
            update.value(Alias::new(field.column()), bind_value(value));
        }
        update
            .and_where(primary_key_matches(descriptor, id))
            .returning_all();

        let statement = DbBackend::Postgres.build(&update);
        match accessor.connection().query_all_raw(statement).await {
            Ok(rows) => match rows.first() {
                Some(row) => match decode_row(row) {
                    Ok(updated) => ApiResponse::ok(updated),
                    Err(err) => ApiResponse::error(500, err.to_string()),
                },
                None => ApiResponse::invalid_data(),
            },
            Err(err) => ApiResponse::error(500, err.to_string()),
        }
    }

    /// Fetch records matching an equality conjunction over the supplied
    /// field/value pairs; an empty filter map returns every record (200
    /// with a possibly empty sequence). Filter values are always bound
    /// parameters; a filter name outside the descriptor yields 400.
    pub async fn find_all(&self, filters: &Record) -> ApiResponse<Vec<Record>> {
        let accessor = match self.accessor() {
            Ok(a) => a,
            Err(err) => return ApiResponse::failure(err),
        };
        let descriptor = accessor.descriptor();

        let mut select = Query::select();
        select
            .column(Asterisk)
            .from(Alias::new(descriptor.identity()));
        for (name, value) in filters {
            match descriptor.field(name) {
                Some(field) => {
                    select.and_where(equals(field, value));
                }
                None => {
                    return ApiResponse::error(400, format!("unknown filter field: {name}"));
                }
            }
        }

        let statement = DbBackend::Postgres.build(&select);
        match accessor.connection().query_all_raw(statement).await {
            Ok(rows) => match decode_rows(&rows) {
                Ok(records) => ApiResponse::ok(records),
                Err(err) => ApiResponse::error(500, err.to_string()),
            },
            Err(err) => ApiResponse::error(500, err.to_string()),
        }
    }

    /// Fetch every record whose primary key is in `ids` with a single
    /// IN-list query. An empty input yields 200 with an empty sequence
    /// without touching the store.
    pub async fn find_by_ids(&self, ids: &[String]) -> ApiResponse<Vec<Record>> {
        if ids.is_empty() {
            return ApiResponse::ok(Vec::new());
        }
        let accessor = match self.accessor() {
            Ok(a) => a,
            Err(err) => return ApiResponse::failure(err),
        };
        let descriptor = accessor.descriptor();

        let mut select = Query::select();
        select
            .column(Asterisk)
            .from(Alias::new(descriptor.identity()))
            .and_where(
                Expr::expr(
                    Expr::col(Alias::new(descriptor.primary_key_column()))
                        .cast_as(Alias::new("text")),
                )
                .is_in(ids.iter().cloned()),
            );

        let statement = DbBackend::Postgres.build(&select);
        match accessor.connection().query_all_raw(statement).await {
            Ok(rows) => match decode_rows(&rows) {
                Ok(records) => ApiResponse::ok(records),
                Err(err) => ApiResponse::error(500, err.to_string()),
            },
            Err(err) => ApiResponse::error(500, err.to_string()),
        }
    }

    /// Delete by primary key after a `find_one` existence check; the
    /// check's 404 is returned unchanged. A row vanishing between check
    /// and delete still resolves to 200 (idempotent, last write wins).
    pub async fn delete(&self, id: &str) -> ApiResponse<()> {
        let existing = self.find_one(id).await;
        if existing.status_code == 404 {
            return existing.error_into();
        }

        let accessor = match self.accessor() {
            Ok(a) => a,
            Err(err) => return ApiResponse::failure(err),
        };
        let descriptor = accessor.descriptor();

        let mut delete = Query::delete();
        delete
            .from_table(Alias::new(descriptor.identity()))
            .and_where(primary_key_matches(descriptor, id));

        let statement = DbBackend::Postgres.build(&delete);
        match accessor.connection().execute_raw(statement).await {
            Ok(_) => ApiResponse::no_payload(),
            Err(err) => ApiResponse::error(500, err.to_string()),
        }
    }

    /// Escape hatch: run a caller-supplied raw predicate against the
    /// entity's table and return the matches. Unlike the envelope
    /// operations, a store failure is logged and propagated as an error
    /// so callers can tell it apart from an empty result.
    pub async fn custom_query(&self, predicate: &str) -> AppResult<Vec<Record>> {
        let accessor = self.accessor()?;
        let sql = format!(
            "SELECT * FROM \"{}\" WHERE {}",
            accessor.descriptor().identity(),
            predicate
        );
        let statement = Statement::from_string(DbBackend::Postgres, sql);
        match accessor.connection().query_all_raw(statement).await {
            Ok(rows) => decode_rows(&rows).map_err(Into::into),
            Err(err) => {
                tracing::error!(predicate, error = %err, "custom query failed");
                Err(err.into())
            }
        }
    }
}

/// Parameterized equality over the primary key. The key column is
/// compared through its text rendering so string identifiers from the
/// route layer match integer and uuid key columns alike.
fn primary_key_matches(descriptor: &EntityDescriptor, id: &str) -> SimpleExpr {
    Expr::expr(
        Expr::col(Alias::new(descriptor.primary_key_column())).cast_as(Alias::new("text")),
    )
    .eq(id)
}

/// Parameterized equality for one filter pair. String inputs (query-string
/// filters) compare against the column's text rendering; typed JSON values
/// bind natively.
fn equals(field: &FieldDef, value: &JsonValue) -> SimpleExpr {
    let column = Expr::col(Alias::new(field.column()));
    match value {
        JsonValue::String(s) => Expr::expr(column.cast_as(Alias::new("text"))).eq(s.as_str()),
        other => Expr::expr(column).eq(bind_value(other)),
    }
}

/// Convert a JSON value into a bound statement parameter.
fn bind_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::String(None),
        JsonValue::Bool(b) => Value::Bool(Some(*b)),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::BigInt(Some(i)),
            None => Value::Double(n.as_f64()),
        },
        JsonValue::String(s) => Value::String(Some(s.clone())),
        other => Value::Json(Some(Box::new(other.clone()))),
    }
}

/// Uniqueness-violation detail, if this store error is one.
fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => Some(detail),
        _ => {
            let message = err.to_string();
            message
                .contains("duplicate key value violates unique constraint")
                .then_some(message)
        }
    }
}

fn decode_row(row: &QueryResult) -> Result<Record, DbErr> {
    match JsonValue::from_query_result(row, "")? {
        JsonValue::Object(map) => Ok(map),
        other => Err(DbErr::Type(format!("expected a row object, got {other}"))),
    }
}

fn decode_rows(rows: &[QueryResult]) -> Result<Vec<Record>, DbErr> {
    rows.iter().map(decode_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bind_value_preserves_json_scalars() {
        assert_eq!(bind_value(&json!(true)), Value::Bool(Some(true)));
        assert_eq!(bind_value(&json!(42)), Value::BigInt(Some(42)));
        assert_eq!(bind_value(&json!(2.5)), Value::Double(Some(2.5)));
        assert_eq!(
            bind_value(&json!("admin")),
            Value::String(Some("admin".to_string()))
        );
        assert_eq!(bind_value(&JsonValue::Null), Value::String(None));
    }

    #[test]
    fn bind_value_passes_structured_json_through() {
        let nested = json!({"a": 1});
        assert_eq!(
            bind_value(&nested),
            Value::Json(Some(Box::new(nested.clone())))
        );
    }

    #[test]
    fn unique_violations_are_recognized_by_message() {
        let err = DbErr::Custom(
            "duplicate key value violates unique constraint \"roles_name_key\"".to_string(),
        );
        assert!(unique_violation(&err).is_some());

        let other = DbErr::Custom("relation \"roles\" does not exist".to_string());
        assert!(unique_violation(&other).is_none());
    }
}
