use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use super::{CoffeeStore, IdGenerator};
use crate::error::{AppError, AppResult};
use crate::models::{Coffee, CoffeeRequest};

/// Path value that selects a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

const UPSERT_SQL: &str = "INSERT INTO coffee (id, name) VALUES (?1, ?2)
     ON CONFLICT(id) DO UPDATE SET name = excluded.name";

/// Durable coffee store backed by a single SQLite table.
///
/// The connection sits behind a `Mutex`; every operation runs on the
/// blocking thread pool so SQLite I/O never stalls the async executor.
#[derive(Clone)]
pub struct SqliteCoffeeStore {
    conn: Arc<Mutex<Connection>>,
    ids: Arc<dyn IdGenerator>,
}

impl SqliteCoffeeStore {
    /// Open (or create) the database at `path` and ensure the table exists.
    ///
    /// # Errors
    ///
    /// Returns `AppError::StorageUnavailable` if the file cannot be opened
    /// or the schema cannot be created.
    pub async fn open(path: impl Into<String>, ids: Arc<dyn IdGenerator>) -> AppResult<Self> {
        let path = path.into();
        let conn = tokio::task::spawn_blocking(move || open_connection(&path))
            .await
            .map_err(|e| AppError::Internal(format!("SQLite open task failed: {e}")))??;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            ids,
        })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| {
                AppError::StorageUnavailable("SQLite connection lock poisoned".to_string())
            })?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| AppError::Internal(format!("SQLite task failed: {e}")))?
    }
}

fn open_connection(path: &str) -> AppResult<Connection> {
    let conn = if path == IN_MEMORY_PATH {
        Connection::open_in_memory()?
    } else {
        // Create parent directory if needed
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::StorageUnavailable(format!(
                    "Cannot create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        conn
    };

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS coffee (
             id   TEXT PRIMARY KEY NOT NULL,
             name TEXT NOT NULL
         );",
    )?;

    info!(path, "SQLite coffee store opened");
    Ok(conn)
}

fn row_to_coffee(row: &rusqlite::Row<'_>) -> rusqlite::Result<Coffee> {
    Ok(Coffee {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

#[async_trait]
impl CoffeeStore for SqliteCoffeeStore {
    async fn insert_all(&self, records: Vec<CoffeeRequest>) -> AppResult<Vec<Coffee>> {
        let prepared: Vec<Coffee> = records
            .into_iter()
            .map(|r| r.into_coffee_or_else(|| self.ids.generate()))
            .collect();

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare_cached(UPSERT_SQL)?;
                for coffee in &prepared {
                    stmt.execute(params![coffee.id, coffee.name])?;
                }
            }
            tx.commit()?;
            debug!(count = prepared.len(), "Inserted coffees in one transaction");
            Ok(prepared)
        })
        .await
    }

    async fn find_all(&self) -> AppResult<Vec<Coffee>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached("SELECT id, name FROM coffee ORDER BY rowid")?;
            let coffees = stmt
                .query_map([], row_to_coffee)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(coffees)
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Coffee>> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let coffee = conn
                .query_row(
                    "SELECT id, name FROM coffee WHERE id = ?1",
                    params![id],
                    row_to_coffee,
                )
                .optional()?;
            Ok(coffee)
        })
        .await
    }

    async fn exists_by_id(&self, id: &str) -> AppResult<bool> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM coffee WHERE id = ?1)",
                params![id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    async fn save(&self, coffee: Coffee) -> AppResult<Coffee> {
        self.with_conn(move |conn| {
            conn.execute(UPSERT_SQL, params![coffee.id, coffee.name])?;
            Ok(coffee)
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            conn.execute("DELETE FROM coffee WHERE id = ?1", params![id])?;
            Ok(())
        })
        .await
    }

    async fn count(&self) -> AppResult<usize> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM coffee", [], |row| row.get(0))?;
            usize::try_from(count)
                .map_err(|e| AppError::Internal(format!("Invalid row count {count}: {e}")))
        })
        .await
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
