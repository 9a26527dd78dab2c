//! Table-driven data access.
//!
//! Every call issues exactly one SQL statement. [`Table`] covers the
//! collection entities (products, services, users) and [`Singleton`] the
//! one-row content tables (about, contact, hero, footer). Entity specifics
//! live in [`Record`] and [`Draft`] implementations in [`crate::types`].
//!
//! Functions here return raw `sqlx::Error`s; callers decide how a failure maps
//! onto the API (for instance a unique violation on `users`).

pub mod users;

use std::collections::BTreeMap;
use std::marker::PhantomData;

use serde::Serialize;
use sqlx::{sqlite::SqliteRow, FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::error::AppResult;

/// A row type persisted in its own table with an integer `id` primary key.
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static {
    /// Table name. Never user input.
    const TABLE: &'static str;
    /// Human-readable entity name used in messages.
    const LABEL: &'static str;
}

/// A single bound column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Text(String),
    OptionalText(Option<String>),
    Real(f64),
    OptionalReal(Option<f64>),
    Integer(i64),
    /// Stored as JSON text.
    Map(BTreeMap<String, String>),
}

/// The writable columns of a record, in insertion order.
pub trait Draft: Send + Sync {
    fn fields(&self) -> Vec<(&'static str, Field)>;

    fn validate(&self) -> AppResult<()> {
        Ok(())
    }
}

fn push_value(qb: &mut QueryBuilder<'_, Sqlite>, value: Field) {
    match value {
        Field::Text(v) => qb.push_bind(v),
        Field::OptionalText(v) => qb.push_bind(v),
        Field::Real(v) => qb.push_bind(v),
        Field::OptionalReal(v) => qb.push_bind(v),
        Field::Integer(v) => qb.push_bind(v),
        Field::Map(v) => qb.push_bind(sqlx::types::Json(v)),
    };
}

fn push_columns(qb: &mut QueryBuilder<'_, Sqlite>, fields: &[(&'static str, Field)]) {
    let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    qb.push(names.join(", "));
}

fn push_values(qb: &mut QueryBuilder<'_, Sqlite>, fields: Vec<(&'static str, Field)>) {
    for (i, (_, value)) in fields.into_iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_value(qb, value);
    }
}

/// CRUD over a many-row table.
pub struct Table<R>(PhantomData<R>);

impl<R: Record> Table<R> {
    /// All rows in id order. Empty when the table is empty.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<R>, sqlx::Error> {
        let sql = format!("SELECT * FROM {} ORDER BY id", R::TABLE);
        sqlx::query_as::<_, R>(&sql).fetch_all(pool).await
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<R>, sqlx::Error> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", R::TABLE);
        sqlx::query_as::<_, R>(&sql).bind(id).fetch_optional(pool).await
    }

    /// Inserts a row and returns it as stored, with its new id.
    pub async fn insert(pool: &SqlitePool, draft: &dyn Draft) -> Result<R, sqlx::Error> {
        let fields = draft.fields();
        let mut qb = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {} (", R::TABLE));
        push_columns(&mut qb, &fields);
        qb.push(") VALUES (");
        push_values(&mut qb, fields);
        qb.push(") RETURNING *");
        qb.build_query_as::<R>().fetch_one(pool).await
    }

    /// Overwrites the draft's columns on row `id`.
    ///
    /// Returns `None` when no row has that id; nothing is written then.
    /// An empty draft writes nothing and returns the row as stored.
    pub async fn update(pool: &SqlitePool, id: i64, draft: &dyn Draft) -> Result<Option<R>, sqlx::Error> {
        let fields = draft.fields();
        if fields.is_empty() {
            return Self::find(pool, id).await;
        }
        let mut qb = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", R::TABLE));
        for (i, (name, value)) in fields.into_iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            qb.push(name).push(" = ");
            push_value(&mut qb, value);
        }
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
        qb.build_query_as::<R>().fetch_optional(pool).await
    }

    /// Deletes row `id`. Returns `false` when nothing was deleted.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let sql = format!("DELETE FROM {} WHERE id = ?", R::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Read and upsert for a one-row content table.
///
/// Singleton tables carry `slot INTEGER NOT NULL DEFAULT 1 UNIQUE CHECK (slot = 1)`,
/// so the database itself refuses a second row and `put` can upsert on it.
pub struct Singleton<R>(PhantomData<R>);

impl<R: Record + Default> Singleton<R> {
    /// The first row by id, or an all-default record when the table is empty.
    pub async fn get(pool: &SqlitePool) -> Result<R, sqlx::Error> {
        let sql = format!("SELECT * FROM {} ORDER BY id LIMIT 1", R::TABLE);
        let row = sqlx::query_as::<_, R>(&sql).fetch_optional(pool).await?;
        Ok(row.unwrap_or_default())
    }

    /// Inserts the row if absent, otherwise overwrites it in place, atomically.
    pub async fn put(pool: &SqlitePool, draft: &dyn Draft) -> Result<R, sqlx::Error> {
        let fields = draft.fields();
        let assignments: Vec<String> =
            fields.iter().map(|(name, _)| format!("{name} = excluded.{name}")).collect();

        let mut qb = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {} (slot, ", R::TABLE));
        push_columns(&mut qb, &fields);
        qb.push(") VALUES (1, ");
        push_values(&mut qb, fields);
        qb.push(") ON CONFLICT(slot) DO UPDATE SET ");
        qb.push(assignments.join(", "));
        qb.push(" RETURNING *");
        qb.build_query_as::<R>().fetch_one(pool).await
    }
}
