//! # Guest Record Store
//!
//! SQLite persistence for guest rows. The app is used by one household at a
//! time, so every operation opens its own connection and relies on SQLite's
//! own locking; there is no pool and no shared connection.

use common::model::guest::Guest;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Entry not found")]
    NotFound,

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("cannot create database directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

const SELECT_COLUMNS: &str =
    "SELECT id, name_english, name_gujarati, mobile, remark, created_at FROM invitations";

#[derive(Debug, Clone)]
pub struct GuestStore {
    path: PathBuf,
}

impl GuestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Creates the database directory and the `invitations` table if needed.
    pub fn init(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS invitations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name_english TEXT NOT NULL,
                name_gujarati TEXT NOT NULL,
                mobile TEXT,
                remark TEXT,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;
        Ok(())
    }

    pub fn insert(
        &self,
        name_english: &str,
        name_gujarati: &str,
        mobile: Option<&str>,
    ) -> Result<Guest, StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO invitations (name_english, name_gujarati, mobile) VALUES (?1, ?2, ?3)",
            params![name_english, name_gujarati, mobile],
        )?;
        let id = conn.last_insert_rowid();
        fetch(&conn, id)?.ok_or(StoreError::NotFound)
    }

    /// All guests, newest first.
    pub fn list(&self) -> Result<Vec<Guest>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id DESC", SELECT_COLUMNS))?;
        let guests = stmt
            .query_map([], guest_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(guests)
    }

    pub fn get(&self, id: i64) -> Result<Guest, StoreError> {
        let conn = self.connect()?;
        fetch(&conn, id)?.ok_or(StoreError::NotFound)
    }

    pub fn update_remark(&self, id: i64, remark: &str) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE invitations SET remark = ?1 WHERE id = ?2",
            params![remark, id],
        )?;
        expect_one(changed)
    }

    /// `None` clears the stored number.
    pub fn update_mobile(&self, id: i64, mobile: Option<&str>) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE invitations SET mobile = ?1 WHERE id = ?2",
            params![mobile, id],
        )?;
        expect_one(changed)
    }

    /// Deleting a missing row is not an error.
    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM invitations WHERE id = ?1", params![id])?;
        Ok(())
    }
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<Guest>, StoreError> {
    let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;
    Ok(stmt.query_row(params![id], guest_from_row).optional()?)
}

fn expect_one(changed: usize) -> Result<(), StoreError> {
    if changed == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

fn guest_from_row(row: &Row<'_>) -> rusqlite::Result<Guest> {
    Ok(Guest {
        id: row.get(0)?,
        name_english: row.get(1)?,
        name_gujarati: row.get(2)?,
        mobile: row.get(3)?,
        remark: row.get(4)?,
        created_at: row.get(5)?,
    })
}
