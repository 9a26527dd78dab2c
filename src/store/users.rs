//! User-specific queries and failure classification.

use sqlx::{error::ErrorKind, SqlitePool};

use super::{Draft, Field, Table};
use crate::error::{validation::MAX_TEXT_LEN, AppError};
use crate::types::User;

/// Role every account gets unless another one is requested.
pub const DEFAULT_ROLE_ID: i64 = 2;
/// Role of the seeded `admin` account.
pub const ADMIN_ROLE_ID: i64 = 1;

/// A validated, already-hashed set of user columns.
pub struct UserChanges(pub Vec<(&'static str, Field)>);

impl Draft for UserChanges {
    fn fields(&self) -> Vec<(&'static str, Field)> {
        self.0.clone()
    }
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn text(&self, column: &str) -> Option<&str> {
        self.0.iter().find_map(|(name, value)| match value {
            Field::Text(v) if *name == column => Some(v.as_str()),
            _ => None,
        })
    }
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn create(pool: &SqlitePool, changes: &UserChanges) -> Result<User, AppError> {
    match Table::<User>::insert(pool, changes).await {
        Ok(user) => Ok(user),
        Err(err) => Err(classify_write_error(pool, err, changes, None).await),
    }
}

pub async fn update(pool: &SqlitePool, id: i64, changes: &UserChanges) -> Result<Option<User>, AppError> {
    if changes.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }
    match Table::<User>::update(pool, id, changes).await {
        Ok(user) => Ok(user),
        Err(err) => Err(classify_write_error(pool, err, changes, Some(id)).await),
    }
}

/// Maps a failed insert/update on `users` onto the API taxonomy.
///
/// The driver reports the constraint kind as a structured error code. For a
/// unique violation the colliding column is found by probing the table,
/// excluding the row being updated.
async fn classify_write_error(
    pool: &SqlitePool,
    err: sqlx::Error,
    changes: &UserChanges,
    exclude_id: Option<i64>,
) -> AppError {
    let kind = match &err {
        sqlx::Error::Database(db_err) => db_err.kind(),
        _ => return err.into(),
    };
    match kind {
        ErrorKind::UniqueViolation => {
            match conflicting_column(pool, changes, exclude_id).await {
                Ok(Some(Conflict::Username)) => AppError::DuplicateUsername,
                Ok(Some(Conflict::Email)) => AppError::DuplicateEmail,
                Ok(None) => AppError::BadRequest("User already exists".to_string()),
                Err(probe_err) => probe_err.into(),
            }
        }
        ErrorKind::ForeignKeyViolation => AppError::validation("role_id", "unknown role"),
        ErrorKind::CheckViolation => {
            AppError::validation("user", format!("username and email must be at most {} characters", MAX_TEXT_LEN))
        }
        _ => err.into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conflict {
    Username,
    Email,
}

async fn conflicting_column(
    pool: &SqlitePool,
    changes: &UserChanges,
    exclude_id: Option<i64>,
) -> Result<Option<Conflict>, sqlx::Error> {
    let exclude = exclude_id.unwrap_or(0);
    for (column, conflict) in [("username", Conflict::Username), ("email", Conflict::Email)] {
        let Some(value) = changes.text(column) else { continue };
        let sql = format!("SELECT EXISTS(SELECT 1 FROM users WHERE {column} = ? AND id <> ?)");
        let taken: i64 = sqlx::query_scalar(&sql).bind(value).bind(exclude).fetch_one(pool).await?;
        if taken != 0 {
            return Ok(Some(conflict));
        }
    }
    Ok(None)
}
