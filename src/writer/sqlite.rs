use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use super::schema_gen::{generate_create_table, generate_indexes};
use crate::error::{Error, Result};
use crate::schema::TableSchema;

/// Owns the single connection used for schema creation and loading
pub struct SqliteWriter {
    pub(super) conn: Connection,
    path: PathBuf,
}

impl SqliteWriter {
    /// Open (or create) the database file. An existing file is left alone;
    /// removing a previous run's output is the caller's job.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path).map_err(|source| Error::Connection {
            path: db_path.to_path_buf(),
            source,
        })?;

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;",
        )?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        log::debug!("Opened {:?} (journal_mode={})", db_path, mode);

        Ok(Self {
            conn,
            path: db_path.to_path_buf(),
        })
    }

    /// Create all tables in one transaction, then confirm each one exists.
    ///
    /// Fails with `CreateTable` if a statement is rejected (e.g. the file
    /// already holds a previous run) and with `SchemaCreation` if any table
    /// is missing from the catalog after commit.
    pub fn create_schema(&mut self, schemas: &[&TableSchema]) -> Result<()> {
        log::info!("Creating {} tables...", schemas.len());

        let tx = self.conn.transaction()?;
        for schema in schemas {
            let sql = generate_create_table(schema);
            tx.execute(&sql, []).map_err(|source| Error::CreateTable {
                table: schema.name,
                source,
            })?;

            for index_sql in generate_indexes(schema) {
                tx.execute(&index_sql, []).map_err(|source| Error::CreateTable {
                    table: schema.name,
                    source,
                })?;
            }
        }
        tx.commit()?;

        let mut missing = Vec::new();
        for schema in schemas {
            if !self.table_exists(schema.name)? {
                missing.push(schema.name.to_string());
            }
        }

        if !missing.is_empty() {
            return Err(Error::SchemaCreation { missing });
        }
        Ok(())
    }

    /// Look the table up in the engine's catalog
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Count rows in a table
    pub fn row_count(&self, schema: &TableSchema) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {}",
            super::schema_gen::quote_ident(schema.name)
        );
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Finalize the database and release the connection
    pub fn finalize(self) -> Result<()> {
        log::debug!("Finalizing database...");
        self.conn.execute_batch("PRAGMA optimize;")?;
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_, source)| Error::Connection { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Dataset;
    use crate::schema::tables::{tables_for, CAMPAIGNS, PLANETS};
    use tempfile::TempDir;

    #[test]
    fn test_create_schema_verifies_every_table() {
        let dir = TempDir::new().unwrap();
        let mut writer = SqliteWriter::open(&dir.path().join("planets.db")).unwrap();
        let tables = tables_for(Dataset::WithCampaigns);

        writer.create_schema(&tables).unwrap();

        for table in &tables {
            assert!(writer.table_exists(table.name).unwrap(), "{}", table.name);
        }
        assert_eq!(writer.row_count(&PLANETS).unwrap(), 0);
    }

    #[test]
    fn test_planets_only_schema_has_no_campaigns() {
        let dir = TempDir::new().unwrap();
        let mut writer = SqliteWriter::open(&dir.path().join("planets.db")).unwrap();
        writer.create_schema(&tables_for(Dataset::PlanetsOnly)).unwrap();

        assert!(writer.table_exists("planets").unwrap());
        assert!(!writer.table_exists(CAMPAIGNS.name).unwrap());
    }

    #[test]
    fn test_rerun_on_existing_database_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("planets.db");
        let tables = tables_for(Dataset::PlanetsOnly);

        let mut writer = SqliteWriter::open(&path).unwrap();
        writer.create_schema(&tables).unwrap();
        writer.finalize().unwrap();

        let mut writer = SqliteWriter::open(&path).unwrap();
        let err = writer.create_schema(&tables).unwrap_err();
        assert!(
            matches!(err, Error::CreateTable { table: "environments", .. }),
            "{:?}",
            err
        );
    }

    #[test]
    fn test_open_fails_for_unreachable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("planets.db");
        assert!(matches!(
            SqliteWriter::open(&path),
            Err(Error::Connection { .. })
        ));
    }
}
