//! SQLite-backed survey cache. Every call opens its own connection inside
//! `spawn_blocking`, so a request never shares a session with another one.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use thiserror::Error;

use crate::modules::survey::model::SurveyRecord;

const TABLE_NAME: &str = "surveys";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum CrudError {
    #[error("A survey for this description already exists")]
    DuplicateDescription,
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Stored survey is not valid JSON: {0}")]
    CorruptRecord(serde_json::Error),
}

/// Lookup and insert by exact description. Implementations must reject a
/// second record for the same description instead of duplicating it.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    async fn find_by_description(&self, description: &str) -> Result<Option<SurveyRecord>, CrudError>;

    async fn insert(&self, record: SurveyRecord) -> Result<i64, CrudError>;
}

#[derive(Debug, Clone)]
pub struct SurveyCrud {
    db_path: PathBuf,
}

impl SurveyCrud {
    /// Opens (or creates) the database file and makes sure the table exists.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, CrudError> {
        let db_path = path.as_ref().to_path_buf();
        let conn = open(&db_path)?;
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {TABLE_NAME} (
                id INTEGER PRIMARY KEY,
                description TEXT NOT NULL UNIQUE,
                generated_json TEXT NOT NULL
            );
            "#
        ))?;
        Ok(Self { db_path })
    }

    pub async fn count(&self) -> Result<u64, CrudError> {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = open(&db_path)?;
            let count: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {TABLE_NAME}"), [], |row| row.get(0))?;
            Ok::<_, CrudError>(count as u64)
        })
        .await?
    }
}

#[async_trait]
impl SurveyRepository for SurveyCrud {
    async fn find_by_description(&self, description: &str) -> Result<Option<SurveyRecord>, CrudError> {
        let db_path = self.db_path.clone();
        let description = description.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = open(&db_path)?;
            let record = conn
                .query_row(
                    &format!(
                        "SELECT id, description, generated_json FROM {TABLE_NAME} WHERE description = ?1 LIMIT 1"
                    ),
                    params![description],
                    |row| {
                        Ok(SurveyRecord {
                            id: Some(row.get(0)?),
                            description: row.get(1)?,
                            generated_json: row.get(2)?,
                        })
                    },
                )
                .optional()?;
            Ok::<_, CrudError>(record)
        })
        .await?
    }

    async fn insert(&self, record: SurveyRecord) -> Result<i64, CrudError> {
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = open(&db_path)?;
            // Dropping the transaction without commit rolls it back.
            let tx = conn.transaction()?;
            tx.execute(
                &format!("INSERT INTO {TABLE_NAME} (description, generated_json) VALUES (?1, ?2)"),
                params![record.description, record.generated_json],
            )
            .map_err(map_insert_error)?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok::<_, CrudError>(id)
        })
        .await?
    }
}

fn open(path: &Path) -> Result<Connection, CrudError> {
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

fn map_insert_error(err: rusqlite::Error) -> CrudError {
    let unique_violation = matches!(
        &err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    );

    if unique_violation {
        CrudError::DuplicateDescription
    } else {
        CrudError::Database(err)
    }
}
