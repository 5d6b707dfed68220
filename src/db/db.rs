use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "cadence.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the user's data directory and applies pending
    /// migrations.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(&db_file_path)
    }

    /// Opens (or creates) the database at `path` and applies pending
    /// migrations.
    pub fn open(path: &Path) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens the database at `path` without touching its schema.
    pub fn open_without_migrations(path: &Path) -> Result<Connection> {
        Ok(Connection::open(path)?)
    }
}
