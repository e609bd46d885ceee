// Durable key-value store backed by SQLite; stands in for the browser's
// local storage in the original deployment target.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct CacheStore {
    db: Arc<Mutex<Connection>>,
}

impl CacheStore {
    /// Open (or create) the store at the default location under the home
    /// directory.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::init(conn)
    }

    /// Fully in-memory store, for tests.
    pub fn in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_cache (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    fn default_path() -> Result<PathBuf> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;

        let db_dir = home_dir.join(".folio");
        std::fs::create_dir_all(&db_dir)?;

        Ok(db_dir.join("cache.db"))
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let db = self.db.lock().await;

        let value = db
            .query_row(
                "SELECT value FROM kv_cache WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let db = self.db.lock().await;

        db.execute(
            "INSERT OR REPLACE INTO kv_cache (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, chrono::Utc::now().timestamp()],
        )?;

        Ok(())
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        let db = self.db.lock().await;

        db.execute("DELETE FROM kv_cache WHERE key = ?1", params![key])?;

        Ok(())
    }
}
