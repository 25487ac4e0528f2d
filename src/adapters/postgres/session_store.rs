//! PostgreSQL implementation of SessionStore.
//!
//! Each session is one row: the id, a version counter and the whole
//! aggregate as a JSONB document. Updates are conditional on the version
//! the caller loaded.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::ports::{SessionStore, StoreError};

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a new PostgresSessionStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: SessionId) -> Result<bool, StoreError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE id = $1")
            .bind(id.as_i64())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| backend("check session existence", e))?;

        Ok(result.0 > 0)
    }
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| StoreError::Backend(format!("Failed to run migrations: {}", e)))
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn get_sessions(&self) -> Result<Vec<Session>, StoreError> {
        let rows = sqlx::query("SELECT data::text AS data FROM sessions ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| backend("fetch sessions", e))?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn get_session(&self, id: SessionId) -> Result<Session, StoreError> {
        let row = sqlx::query("SELECT data::text AS data FROM sessions WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| backend("fetch session", e))?;

        match row {
            Some(row) => row_to_session(row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn create_session(&self, session: &Session) -> Result<(), StoreError> {
        let data = encode_session(session)?;

        let result = sqlx::query(
            r#"
            INSERT INTO sessions (id, version, data)
            VALUES ($1, $2, $3::jsonb)
            "#,
        )
        .bind(session.id().as_i64())
        .bind(version_to_db(session.version())?)
        .bind(data)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::AlreadyExists(session.id()))
            }
            Err(e) => Err(backend("insert session", e)),
        }
    }

    async fn update_session(&self, session: &Session) -> Result<(), StoreError> {
        let mut next = session.clone();
        next.advance_version();
        let data = encode_session(&next)?;

        let result = sqlx::query(
            r#"
            UPDATE sessions SET
                version = $2,
                data = $3::jsonb
            WHERE id = $1 AND version = $4
            "#,
        )
        .bind(session.id().as_i64())
        .bind(version_to_db(next.version())?)
        .bind(data)
        .bind(version_to_db(session.version())?)
        .execute(&self.pool)
        .await
        .map_err(|e| backend("update session", e))?;

        if result.rows_affected() == 0 {
            if self.exists(session.id()).await? {
                return Err(StoreError::Conflict {
                    id: session.id(),
                    expected: session.version(),
                });
            }
            return Err(StoreError::NotFound(session.id()));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn backend(action: &str, e: sqlx::Error) -> StoreError {
    StoreError::Backend(format!("Failed to {}: {}", action, e))
}

fn version_to_db(version: u64) -> Result<i64, StoreError> {
    i64::try_from(version)
        .map_err(|_| StoreError::Serialization(format!("Version out of range: {}", version)))
}

fn encode_session(session: &Session) -> Result<String, StoreError> {
    serde_json::to_string(session).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn decode_session(data: &str) -> Result<Session, StoreError> {
    serde_json::from_str(data).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<Session, StoreError> {
    let data: String = row
        .try_get("data")
        .map_err(|e| backend("get data", e))?;

    decode_session(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::session::NewSubmission;

    #[test]
    fn session_document_roundtrips() {
        let mut session = Session::new(SessionId::new(4), "Friday").unwrap();
        session.add_submission(NewSubmission::titled(UserId::new(1), "Song"));
        session.advance_version();

        let decoded = decode_session(&encode_session(&session).unwrap()).unwrap();
        assert_eq!(decoded, session);
        assert_eq!(decoded.version(), 1);
    }

    #[test]
    fn malformed_document_is_a_serialization_error() {
        assert!(matches!(
            decode_session("{\"id\": \"nope\"}"),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn version_conversion_rejects_overflow() {
        assert_eq!(version_to_db(7).unwrap(), 7);
        assert!(version_to_db(u64::MAX).is_err());
    }
}
