use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::ResultLogger;
use crate::domain::{Outcome, OutcomeReport};
use crate::error::SmsGateError;
use crate::transport::BoxFuture;

/// File name of the store used when a handler is built without `db_uri`.
/// It lives in [`std::env::temp_dir`].
pub const DEFAULT_STORE_FILE: &str = "smsgate-results.sqlite";

const CREATE_RESULTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Results (
    success INTEGER NOT NULL CHECK (success IN (0, 1)),
    phone TEXT NOT NULL,
    error_code INTEGER,
    error_msg TEXT
)
"#;

const INSERT_RESULT: &str =
    "INSERT INTO Results (success, phone, error_code, error_msg) VALUES (?, ?, ?, ?)";

const SELECT_RESULTS: &str =
    "SELECT success, phone, error_code, error_msg FROM Results ORDER BY rowid";

pub fn default_store_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_STORE_FILE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One stored outcome, as read back from the `Results` table.
pub struct ResultRow {
    /// `1` for delivered, `0` for failed.
    pub success: i64,
    pub phone: String,
    pub error_code: Option<i64>,
    pub error_msg: Option<String>,
}

type ResultTuple = (i64, String, Option<i64>, Option<String>);

impl From<ResultTuple> for ResultRow {
    fn from((success, phone, error_code, error_msg): ResultTuple) -> Self {
        Self {
            success,
            phone,
            error_code,
            error_msg,
        }
    }
}

/// Appends one row per outcome to the SQLite `Results` table.
///
/// The table is created on connect if it does not exist yet. Every insert
/// commits on its own. The single connection is guarded by a mutex, so a
/// logger shared between tasks serializes its writes.
pub struct RecordLogger {
    location: String,
    conn: Mutex<SqliteConnection>,
}

impl RecordLogger {
    /// Connect to an existing store.
    ///
    /// `location` is an sqlx SQLite URL or a path (`sqlite::memory:`,
    /// `sqlite://results.db?mode=rwc`, `results.db`). The file must already
    /// exist unless the URL asks for `mode=rwc`.
    pub async fn connect(location: &str) -> Result<Self, SmsGateError> {
        let options = SqliteConnectOptions::from_str(location)?;
        Self::connect_with(options, location.to_owned()).await
    }

    /// Connect to the store at `path`, creating the file if needed.
    pub async fn connect_or_create(path: impl AsRef<Path>) -> Result<Self, SmsGateError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect_with(options, path.display().to_string()).await
    }

    async fn connect_with(
        options: SqliteConnectOptions,
        location: String,
    ) -> Result<Self, SmsGateError> {
        let mut conn = SqliteConnection::connect_with(&options).await?;
        sqlx::query(CREATE_RESULTS_TABLE).execute(&mut conn).await?;
        info!(location = %location, "Result store ready");
        Ok(Self {
            location,
            conn: Mutex::new(conn),
        })
    }

    /// Where this logger writes.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Read back every stored outcome in insertion order.
    pub async fn results(&self) -> Result<Vec<ResultRow>, SmsGateError> {
        let mut conn = self.conn.lock().await;
        let rows = sqlx::query_as::<_, ResultTuple>(SELECT_RESULTS)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(ResultRow::from).collect())
    }

    async fn insert(&self, outcome: &Outcome) -> Result<(), SmsGateError> {
        let mut conn = self.conn.lock().await;
        sqlx::query(INSERT_RESULT)
            .bind(i64::from(outcome.is_ok()))
            .bind(outcome.phone())
            .bind(outcome.error_code())
            .bind(outcome.error_msg())
            .execute(&mut *conn)
            .await?;
        debug!(phone = outcome.phone(), status = outcome.status().as_str(), "Outcome stored");
        Ok(())
    }
}

impl std::fmt::Debug for RecordLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordLogger")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl ResultLogger for RecordLogger {
    fn log<'a>(&'a self, report: &'a OutcomeReport) -> BoxFuture<'a, Result<(), SmsGateError>> {
        Box::pin(async move {
            let outcome = Outcome::try_from(report)?;
            self.insert(&outcome).await
        })
    }
}
