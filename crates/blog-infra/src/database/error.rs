//! Classification of SeaORM errors into repository errors.

use sea_orm::{DbErr, RuntimeErr, SqlErr, sqlx};

use blog_core::RepoError;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Split a `DbErr` into not-found, connectivity, constraint and query failures.
pub(crate) fn classify(err: DbErr) -> RepoError {
    if let Some(detail) = unique_violation(&err) {
        return RepoError::Constraint(detail);
    }

    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

fn unique_violation(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db))) => {
            (db.code().as_deref() == Some(UNIQUE_VIOLATION)).then(|| db.message().to_owned())
        }
        _ => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Some(detail),
            _ => None,
        },
    }
}
