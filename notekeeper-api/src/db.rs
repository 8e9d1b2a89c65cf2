//! PostgreSQL Storage Adapter
//!
//! Connection pooling with deadpool-postgres and the SQL behind each
//! `NoteStore` operation. Every operation is a single statement touching
//! at most one row.
//!
//! The `id` column is `serial` (int4). Ids are read as `id::BIGINT` and
//! bound as `$n::BIGINT` so the rest of the crate only sees `i64`.
//! Timestamps are `timestamp` columns holding UTC wall time.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use notekeeper_core::{Note, NoteDraft, NoteId, StorageError, StorageResult};
use notekeeper_storage::NoteStore;
use std::fmt;
use std::str::FromStr;
use tokio_postgres::{NoTls, Row};

// ============================================================================
// SQL
// ============================================================================

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS notes (
    id serial PRIMARY KEY,
    title varchar(20) NOT NULL,
    description text NOT NULL,
    created timestamp NOT NULL DEFAULT (now() AT TIME ZONE 'utc'),
    changed timestamp
)";

const LIST_SQL: &str =
    "SELECT id::BIGINT, title, description, created, changed FROM notes ORDER BY id";

const GET_SQL: &str =
    "SELECT id::BIGINT, title, description, created, changed FROM notes WHERE id = $1::BIGINT";

const INSERT_SQL: &str = "INSERT INTO notes (title, description) VALUES ($1, $2)
    RETURNING id::BIGINT, title, description, created, changed";

const UPDATE_SQL: &str = "UPDATE notes
    SET title = $2, description = $3, changed = (now() AT TIME ZONE 'utc')
    WHERE id = $1::BIGINT
    RETURNING id::BIGINT, title, description, created, changed";

const DELETE_SQL: &str = "DELETE FROM notes WHERE id = $1::BIGINT";

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// TLS negotiation mode, mirroring libpq's `sslmode`.
///
/// The pool connects with `NoTls`, so `require` only succeeds against a
/// server that does not insist on TLS. It is accepted for config parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    Disable,
    #[default]
    Prefer,
    Require,
}

impl FromStr for SslMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            _ => Err("expected one of disable, prefer, require".to_string()),
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
        };
        f.write_str(s)
    }
}

impl From<SslMode> for deadpool_postgres::SslMode {
    fn from(mode: SslMode) -> Self {
        match mode {
            SslMode::Disable => deadpool_postgres::SslMode::Disable,
            SslMode::Prefer => deadpool_postgres::SslMode::Prefer,
            SslMode::Require => deadpool_postgres::SslMode::Require,
        }
    }
}

/// Database connection pool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// TLS mode
    pub sslmode: SslMode,
    /// Maximum pool size
    pub max_size: usize,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "notes".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            sslmode: SslMode::Prefer,
            max_size: 16,
        }
    }
}

impl DbConfig {
    /// Create a connection pool from this configuration.
    ///
    /// No connection is opened here; the first checkout does that.
    pub fn create_pool(&self) -> StorageResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        if !self.password.is_empty() {
            cfg.password = Some(self.password.clone());
        }
        cfg.ssl_mode = Some(self.sslmode.into());
        cfg.pool = Some(PoolConfig::new(self.max_size));

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        cfg.create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| StorageError::Connection {
                reason: format!("failed to create pool: {}", e),
            })
    }
}

// ============================================================================
// DATABASE CLIENT
// ============================================================================

/// `NoteStore` backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a client without touching the database.
    pub fn from_config(config: &DbConfig) -> StorageResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Create a client and make sure the notes table exists before
    /// returning it.
    pub async fn connect(config: &DbConfig) -> StorageResult<Self> {
        let client = Self::from_config(config)?;
        client.ensure_schema().await?;
        tracing::info!(
            host = %config.host,
            port = config.port,
            dbname = %config.dbname,
            "Connected to PostgreSQL"
        );
        Ok(client)
    }

    /// Get the current pool size for observability.
    pub fn pool_size(&self) -> usize {
        self.pool.status().size
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> StorageResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(|e| {
            tracing::error!(error = ?e, "Connection pool error");
            StorageError::Connection {
                reason: e.to_string(),
            }
        })
    }
}

fn query_error(operation: &'static str) -> impl FnOnce(tokio_postgres::Error) -> StorageError {
    move |err| {
        tracing::error!(op = operation, error = ?err, "Database error");
        StorageError::Query {
            operation: operation.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Map a `RETURNING` / `SELECT` row to a `Note`.
fn note_from_row(row: &Row) -> StorageResult<Note> {
    let mapping = |e: tokio_postgres::Error| StorageError::RowMapping {
        reason: e.to_string(),
    };
    let id: i64 = row.try_get(0).map_err(mapping)?;
    let title: String = row.try_get(1).map_err(mapping)?;
    let description: String = row.try_get(2).map_err(mapping)?;
    let created: NaiveDateTime = row.try_get(3).map_err(mapping)?;
    let changed: Option<NaiveDateTime> = row.try_get(4).map_err(mapping)?;

    Ok(Note {
        id: NoteId::new(id),
        title,
        description,
        created: created.and_utc(),
        changed: changed.map(|ts| ts.and_utc()),
    })
}

#[async_trait]
impl NoteStore for DbClient {
    async fn ensure_schema(&self) -> StorageResult<()> {
        let conn = self.get_conn().await?;
        conn.batch_execute(CREATE_TABLE_SQL).await.map_err(|e| {
            tracing::error!(error = ?e, "Schema setup failed");
            StorageError::Schema {
                reason: e.to_string(),
            }
        })
    }

    async fn health_check(&self) -> StorageResult<()> {
        let conn = self.get_conn().await?;
        conn.query_one("SELECT 1", &[])
            .await
            .map_err(query_error("health_check"))?;
        Ok(())
    }

    async fn note_list(&self) -> StorageResult<Vec<Note>> {
        let conn = self.get_conn().await?;
        let rows = conn
            .query(LIST_SQL, &[])
            .await
            .map_err(query_error("note_list"))?;
        rows.iter().map(note_from_row).collect()
    }

    async fn note_get(&self, id: NoteId) -> StorageResult<Note> {
        let conn = self.get_conn().await?;
        let row = conn
            .query_opt(GET_SQL, &[&id.get()])
            .await
            .map_err(query_error("note_get"))?
            .ok_or(StorageError::NotFound { id })?;
        note_from_row(&row)
    }

    async fn note_insert(&self, draft: &NoteDraft) -> StorageResult<Note> {
        let conn = self.get_conn().await?;
        let row = conn
            .query_one(INSERT_SQL, &[&draft.title(), &draft.description()])
            .await
            .map_err(query_error("note_insert"))?;
        note_from_row(&row)
    }

    async fn note_update(&self, id: NoteId, draft: &NoteDraft) -> StorageResult<Note> {
        let conn = self.get_conn().await?;
        let row = conn
            .query_opt(UPDATE_SQL, &[&id.get(), &draft.title(), &draft.description()])
            .await
            .map_err(query_error("note_update"))?
            .ok_or(StorageError::NotFound { id })?;
        note_from_row(&row)
    }

    async fn note_delete(&self, id: NoteId) -> StorageResult<()> {
        let conn = self.get_conn().await?;
        let affected = conn
            .execute(DELETE_SQL, &[&id.get()])
            .await
            .map_err(query_error("note_delete"))?;
        if affected == 0 {
            return Err(StorageError::NotFound { id });
        }
        Ok(())
    }
}
