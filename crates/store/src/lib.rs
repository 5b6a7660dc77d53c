// Asset store backed by SQLite

pub mod filter;
pub mod schema;

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use activos_import::{Asset, AssetStore, StoreError};

pub use filter::AssetFilter;

/// Timestamp layout written to `updated_at`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Layouts accepted when reading `updated_at` back (rows may predate this tool).
const TIMESTAMP_READ_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const SELECT_COLUMNS: &str =
    "id, sync_id, codigo, nombre, edificio, nivel, categoria, espacio, serie, updated_at, deleted";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StoreError::Backend(e.to_string()))?;
            }
        }
        let conn = Connection::open(path).map_err(map_err)?;
        log::debug!("opened asset store at {}", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(map_err)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(schema::SCHEMA).map_err(map_err)?;
        Ok(Self { conn })
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM activos", [], |r| r.get(0))
            .map_err(map_err)?;
        Ok(n as usize)
    }

    /// Assets matching `filter`, ordered by code.
    pub fn list(&self, filter: &AssetFilter) -> Result<Vec<Asset>, StoreError> {
        let (clause, args) = filter.to_sql();
        let sql = format!("SELECT {SELECT_COLUMNS} FROM activos{clause} ORDER BY codigo");

        let mut stmt = self.conn.prepare(&sql).map_err(map_err)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter()), asset_from_row)
            .map_err(map_err)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(map_err)
    }
}

impl AssetStore for SqliteStore {
    fn find_by_code(&self, code: &str) -> Result<Option<Asset>, StoreError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM activos WHERE codigo = ?1");
        self.conn
            .query_row(&sql, params![code], asset_from_row)
            .optional()
            .map_err(map_err)
    }

    fn create(&mut self, asset: &Asset) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO activos (sync_id, codigo, nombre, edificio, nivel, categoria, espacio, serie, updated_at, deleted) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    asset.sync_id,
                    asset.code,
                    asset.name,
                    asset.building,
                    asset.floor,
                    asset.category,
                    asset.space,
                    asset.serial,
                    asset.updated_at.map(format_timestamp),
                    asset.deleted,
                ],
            )
            .map_err(map_err)?;
        Ok(())
    }

    fn update(&mut self, asset: &Asset) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE activos SET nombre = ?1, edificio = ?2, nivel = ?3, categoria = ?4, espacio = ?5, \
                 serie = ?6, updated_at = ?7, deleted = ?8 WHERE codigo = ?9",
                params![
                    asset.name,
                    asset.building,
                    asset.floor,
                    asset.category,
                    asset.space,
                    asset.serial,
                    asset.updated_at.map(format_timestamp),
                    asset.deleted,
                    asset.code,
                ],
            )
            .map_err(map_err)?;

        if changed == 0 {
            return Err(StoreError::Backend(format!("no record with codigo '{}'", asset.code)));
        }
        Ok(())
    }
}

fn asset_from_row(row: &Row<'_>) -> rusqlite::Result<Asset> {
    let updated_at: Option<String> = row.get(9)?;
    Ok(Asset {
        id: row.get(0)?,
        sync_id: row.get(1)?,
        code: row.get(2)?,
        name: row.get(3)?,
        building: row.get(4)?,
        floor: row.get(5)?,
        category: row.get(6)?,
        space: row.get(7)?,
        serial: row.get(8)?,
        updated_at: updated_at.as_deref().and_then(parse_timestamp),
        deleted: row.get(10)?,
    })
}

fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_READ_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn map_err(e: rusqlite::Error) -> StoreError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            StoreError::Constraint(e.to_string())
        }
        _ => StoreError::Backend(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn asset(code: &str, sync_id: &str, name: &str) -> Asset {
        Asset {
            id: None,
            sync_id: sync_id.into(),
            code: code.into(),
            name: name.into(),
            building: Some("Edificio A".into()),
            floor: None,
            category: None,
            space: None,
            serial: None,
            updated_at: NaiveDate::from_ymd_opt(2026, 5, 4)
                .unwrap()
                .and_hms_milli_opt(8, 15, 0, 250),
            deleted: Some(0),
        }
    }

    #[test]
    fn create_and_find() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.create(&asset("A-1", "s1", "Chair")).unwrap();

        let found = store.find_by_code("A-1").unwrap().unwrap();
        assert_eq!(found.id, Some(1));
        assert_eq!(found.name, "Chair");
        assert_eq!(found.building.as_deref(), Some("Edificio A"));
        assert_eq!(found.updated_at, asset("A-1", "s1", "Chair").updated_at);
        assert!(store.find_by_code("a-1").unwrap().is_none());
    }

    #[test]
    fn duplicate_code_is_constraint_error() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.create(&asset("A-1", "s1", "Chair")).unwrap();

        let err = store.create(&asset("A-1", "s2", "Other")).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)), "{err}");
        let err = store.create(&asset("A-2", "s1", "Other")).unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)), "{err}");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn update_overwrites_and_clears() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.create(&asset("A-1", "s1", "Chair")).unwrap();

        let mut changed = store.find_by_code("A-1").unwrap().unwrap();
        changed.name = "Chair v2".into();
        changed.building = None;
        changed.deleted = Some(1);
        store.update(&changed).unwrap();

        let back = store.find_by_code("A-1").unwrap().unwrap();
        assert_eq!(back.name, "Chair v2");
        assert_eq!(back.building, None);
        assert_eq!(back.deleted, Some(1));
        assert_eq!(back.sync_id, "s1");
    }

    #[test]
    fn update_of_unknown_code_fails() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let err = store.update(&asset("X", "s1", "Ghost")).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn reads_legacy_timestamp_layouts() {
        assert!(parse_timestamp("2024-02-03 10:11:12").is_some());
        assert!(parse_timestamp("2024-02-03T10:11:12.123456").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
