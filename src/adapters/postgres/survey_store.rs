//! PostgreSQL implementation of SurveyStore.
//!
//! Appends rows to `survey_results`. Each insert runs in its own
//! transaction on a connection leased from the shared pool.

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{Connection, PgConnection, PgPool, Postgres};

use crate::domain::foundation::RecordId;
use crate::domain::survey::SurveyRecord;
use crate::ports::{StoreConnection, StoreError, SurveyStore};

const INSERT_SURVEY_RESULT: &str = r#"
    INSERT INTO survey_results (
        session_id,
        q1_response, q2_response, q3_response, q4_response, q5_response, q6_response,
        n1, n2, n3,
        plot_x, plot_y,
        browser, region, source, hash_email_session
    ) VALUES (
        $1,
        CAST($2 AS SMALLINT), CAST($3 AS SMALLINT), CAST($4 AS SMALLINT),
        CAST($5 AS SMALLINT), CAST($6 AS SMALLINT), CAST($7 AS SMALLINT),
        $8, $9, $10,
        CAST($11 AS NUMERIC(6, 2)), CAST($12 AS NUMERIC(6, 2)),
        $13, $14, $15, $16
    )
    RETURNING id
"#;

/// PostgreSQL implementation of SurveyStore.
#[derive(Clone)]
pub struct PostgresSurveyStore {
    pool: PgPool,
}

impl PostgresSurveyStore {
    /// Creates a new PostgresSurveyStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SurveyStore for PostgresSurveyStore {
    async fn acquire(&self) -> Result<Box<dyn StoreConnection>, StoreError> {
        let conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| classify_sqlx_error(&e))?;

        Ok(Box::new(PgStoreConnection { conn }))
    }
}

/// A pooled connection. Returned to the pool when dropped.
pub struct PgStoreConnection {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl StoreConnection for PgStoreConnection {
    async fn insert_record(&mut self, record: &SurveyRecord) -> Result<RecordId, StoreError> {
        let mut tx = self
            .conn
            .begin()
            .await
            .map_err(|e| classify_sqlx_error(&e))?;

        match insert_row(&mut tx, record).await {
            Ok(id) => {
                tx.commit().await.map_err(|e| classify_commit_error(&e))?;
                Ok(RecordId::new(id))
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback after failed insert failed");
                }
                Err(classify_sqlx_error(&err))
            }
        }
    }
}

async fn insert_row(conn: &mut PgConnection, record: &SurveyRecord) -> Result<i64, sqlx::Error> {
    let answers = record.answers();
    let scores = record.scores();
    let plot = record.plot_point();
    let context = record.context();

    sqlx::query_scalar::<_, i64>(INSERT_SURVEY_RESULT)
        .bind(record.session_id().as_str())
        .bind(answers[0])
        .bind(answers[1])
        .bind(answers[2])
        .bind(answers[3])
        .bind(answers[4])
        .bind(answers[5])
        .bind(i64::from(scores.pre_modern))
        .bind(i64::from(scores.modern))
        .bind(i64::from(scores.post_modern))
        .bind(plot.x)
        .bind(plot.y)
        .bind(context.browser.as_deref())
        .bind(context.region.as_deref())
        .bind(context.source.as_str())
        .bind(context.session_hash.as_deref())
        .fetch_one(conn)
        .await
}

/// Maps a sqlx error onto the transient/permanent split.
///
/// Messages are rebuilt from the error kind so connection strings never leak.
pub(crate) fn classify_sqlx_error(err: &sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(e) => StoreError::transient(format!("connection I/O error: {}", e)),
        sqlx::Error::PoolTimedOut => {
            StoreError::transient("timed out acquiring a pooled connection")
        }
        sqlx::Error::WorkerCrashed => StoreError::transient("database connection worker crashed"),
        sqlx::Error::Tls(_) => StoreError::transient("TLS handshake with the database failed"),
        sqlx::Error::PoolClosed => StoreError::permanent("connection pool is closed"),
        sqlx::Error::Configuration(_) => StoreError::permanent("invalid database configuration"),
        sqlx::Error::Protocol(msg) => StoreError::permanent(format!("protocol error: {}", msg)),
        sqlx::Error::Database(db) => {
            let message = db.message().to_string();
            match db.code() {
                Some(code) => classify_sqlstate(&code, message),
                None => StoreError::permanent(message),
            }
        }
        other => StoreError::permanent(format!("unexpected database error: {}", other)),
    }
}

/// Maps a failed COMMIT.
///
/// A COMMIT lost on the wire may still have been applied, so a retry could
/// store the row twice. Only errors the server reported for a transaction it
/// rolled back stay retryable; everything else is permanent.
pub(crate) fn classify_commit_error(err: &sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = err {
        if let Some(code) = db.code() {
            if !code.starts_with("08") {
                return classify_sqlstate(&code, db.message().to_string());
            }
        }
    }

    let cause = classify_sqlx_error(err);
    StoreError::permanent(format!("commit outcome unknown: {}", cause.message))
}

/// Classifies a PostgreSQL SQLSTATE.
///
/// Class 08 (connection exception), serialization failure, deadlock,
/// admin shutdown and too-many-connections are worth retrying. Everything
/// else, including integrity (23), auth (28) and syntax (42) errors, is not.
pub(crate) fn classify_sqlstate(code: &str, message: String) -> StoreError {
    let transient = code.starts_with("08")
        || matches!(code, "40001" | "40P01" | "57P01" | "57P02" | "57P03" | "53300");

    let message = format!("[{}] {}", code, message);
    if transient {
        StoreError::transient(message)
    } else {
        StoreError::permanent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::FailureKind;

    #[test]
    fn connection_exceptions_are_transient() {
        for code in ["08000", "08003", "08006", "08001"] {
            let err = classify_sqlstate(code, "connection failure".to_string());
            assert_eq!(err.kind, FailureKind::Transient, "code {}", code);
        }
    }

    #[test]
    fn conflicts_and_shutdowns_are_transient() {
        for code in ["40001", "40P01", "57P01", "53300"] {
            assert!(classify_sqlstate(code, String::new()).is_retryable(), "code {}", code);
        }
    }

    #[test]
    fn integrity_auth_and_syntax_errors_are_permanent() {
        for code in ["23505", "23502", "28P01", "42601", "42P01", "22003"] {
            let err = classify_sqlstate(code, "rejected".to_string());
            assert_eq!(err.kind, FailureKind::Permanent, "code {}", code);
        }
    }

    #[test]
    fn sqlstate_is_kept_in_message() {
        let err = classify_sqlstate("23505", "duplicate key".to_string());
        assert_eq!(err.message, "[23505] duplicate key");
    }

    #[test]
    fn pool_errors_are_classified() {
        assert!(classify_sqlx_error(&sqlx::Error::PoolTimedOut).is_retryable());
        assert!(classify_sqlx_error(&sqlx::Error::WorkerCrashed).is_retryable());
        assert!(!classify_sqlx_error(&sqlx::Error::PoolClosed).is_retryable());
        assert!(!classify_sqlx_error(&sqlx::Error::RowNotFound).is_retryable());
    }

    #[test]
    fn io_errors_are_transient() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = classify_sqlx_error(&sqlx::Error::Io(io));
        assert!(err.is_retryable());
        assert!(err.message.contains("reset by peer"));
    }

    #[test]
    fn lost_commit_is_not_retried() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = classify_commit_error(&sqlx::Error::Io(io));
        assert_eq!(err.kind, FailureKind::Permanent);
        assert!(err.message.starts_with("commit outcome unknown"));
        assert!(err.message.contains("reset by peer"));

        assert!(!classify_commit_error(&sqlx::Error::WorkerCrashed).is_retryable());
        assert!(!classify_commit_error(&sqlx::Error::Protocol("eof".into())).is_retryable());
    }

    #[test]
    fn same_errors_before_commit_stay_transient() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        assert!(classify_sqlx_error(&sqlx::Error::Io(io)).is_retryable());
        assert!(classify_sqlx_error(&sqlx::Error::WorkerCrashed).is_retryable());
    }

    #[test]
    fn configuration_errors_hide_details() {
        let source: Box<dyn std::error::Error + Send + Sync> =
            "postgres://user:hunter2@db/survey is invalid".into();
        let err = classify_sqlx_error(&sqlx::Error::Configuration(source));
        assert!(!err.is_retryable());
        assert!(!err.message.contains("hunter2"));
    }
}
