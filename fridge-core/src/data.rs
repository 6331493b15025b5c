use rusqlite::{Connection, OptionalExtension, Result, params};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// SQLite store behind the web application: lists and the items they own.
pub struct Database {
    conn: Connection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FridgeList {
    pub id: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub list_id: i64,
    pub text: String,
    pub created_at: i64,
}

fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

impl Database {
    pub fn drop(path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;
        Self::with_connection(conn)
    }

    /// A private database that disappears with the connection.
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS lists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    list_id INTEGER NOT NULL,
    text TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL,

    FOREIGN KEY(list_id) REFERENCES lists(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_items_list ON items(list_id);
            ",
        )?;
        Ok(())
    }

    pub fn create_list(&self) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO lists (created_at) VALUES (?1)",
            params![current_timestamp()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Creates a list holding a single item. Returns `(list_id, item_id)`.
    pub fn create_list_with_item(&self, text: &str) -> Result<(i64, i64)> {
        let tx = self.conn.unchecked_transaction()?;
        let timestamp = current_timestamp();

        tx.execute(
            "INSERT INTO lists (created_at) VALUES (?1)",
            params![timestamp],
        )?;
        let list_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO items (list_id, text, created_at) VALUES (?1, ?2, ?3)",
            params![list_id, text, timestamp],
        )?;
        let item_id = tx.last_insert_rowid();

        tx.commit()?;
        Ok((list_id, item_id))
    }

    /// Appends an item to an existing list. Fails with a foreign key
    /// violation when the list does not exist.
    pub fn add_item(&self, list_id: i64, text: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO items (list_id, text, created_at) VALUES (?1, ?2, ?3)",
            params![list_id, text, current_timestamp()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn find_list(&self, id: i64) -> Result<Option<FridgeList>> {
        self.conn
            .query_row(
                "SELECT id, created_at FROM lists WHERE id = ?1",
                params![id],
                |row| {
                    Ok(FridgeList {
                        id: row.get(0)?,
                        created_at: row.get(1)?,
                    })
                },
            )
            .optional()
    }

    /// Items of a list in the order they were added.
    pub fn items_for_list(&self, list_id: i64) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, list_id, text, created_at FROM items WHERE list_id = ?1 ORDER BY id",
        )?;

        let items = stmt
            .query_map(params![list_id], |row| {
                Ok(Item {
                    id: row.get(0)?,
                    list_id: row.get(1)?,
                    text: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>>>()?;

        Ok(items)
    }

    pub fn list_count(&self) -> Result<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM lists", [], |row| row.get(0))
    }

    pub fn item_count(&self) -> Result<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
    }
}
