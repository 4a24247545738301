//! SQLite Catalog Store
//!
//! [`CatalogStore`] backed by an embedded SQLite database (bundled via `rusqlite`).
//!
//! ## Layout
//! - **`manufacturers`**: one row per maker, unique by name. Sub-brands are kept as a JSON
//!   array in a text column.
//! - **`vehicles`**: one row per model, with a foreign key to `manufacturers`. Foreign keys
//!   are switched on for every connection, so the store rejects orphaned vehicles.
//! - **`posts`**: the demo resource.
//!
//! Name ordering uses the `locale` collation, the same Unicode comparison the in-memory
//! vehicle sort uses.
//!
//! A single connection sits behind a mutex. Each call is moved onto the blocking pool so
//! that SQLite work never stalls the async executor. [`SqliteStore::close`] releases it.

use super::backend::CatalogStore;
use super::error::{StorageError, StorageResult};
use crate::catalog::sort::locale_cmp;
use crate::catalog::types::{
    Manufacturer, ManufacturerName, ManufacturerWithVehicles, NewManufacturer, NewVehicle,
    Vehicle, VehicleComplete, VehicleWithManufacturerName,
};
use crate::posts::types::{NewPost, Post};

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::functions::FunctionFlags;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS manufacturers (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    manu_name     TEXT NOT NULL UNIQUE,
    manu_country  TEXT NOT NULL,
    logo          TEXT,
    founder       TEXT,
    headquarters  TEXT,
    sub_brands    TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS vehicles (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    model_name        TEXT NOT NULL,
    model_year        TEXT NOT NULL,
    manufacturer_id   INTEGER NOT NULL REFERENCES manufacturers(id),
    image             TEXT,
    production_years  TEXT,
    model_years       TEXT,
    class             TEXT,
    body_style        TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_vehicles_identity
    ON vehicles(manufacturer_id, model_name, model_year);

CREATE TABLE IF NOT EXISTS posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    content     TEXT,
    created_at  TEXT NOT NULL
);
";

const MANUFACTURER_COLUMNS: &str =
    "m.id, m.manu_name, m.manu_country, m.logo, m.founder, m.headquarters, m.sub_brands";

const VEHICLE_COLUMNS: &str = "v.id, v.model_name, v.model_year, v.manufacturer_id, v.image, \
     v.production_years, v.model_years, v.class, v.body_style";

const VEHICLE_COLUMN_COUNT: usize = 9;

pub struct SqliteStore {
    /// `None` once the store has been closed.
    conn: Arc<Mutex<Option<Connection>>>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and makes sure the schema exists.
    ///
    /// `":memory:"` opens a private in-memory database.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            StorageError::connection(format!("failed to open {}: {}", path.display(), e))
        })?;
        tracing::info!("Opened SQLite catalog store at {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::connection(e.to_string()))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> StorageResult<Self> {
        conn.create_scalar_function(
            "fold",
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let value: Option<String> = ctx.get(0)?;
                Ok(value.map(|s| s.to_lowercase()))
            },
        )
        .map_err(|e| StorageError::connection(format!("failed to register fold(): {}", e)))?;

        conn.create_collation("locale", locale_cmp).map_err(|e| {
            StorageError::connection(format!("failed to register locale collation: {}", e))
        })?;

        conn.execute_batch(SCHEMA)
            .map_err(|e| StorageError::connection(format!("failed to apply schema: {}", e)))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(Some(conn))),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> StorageResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || -> StorageResult<T> {
            let guard = conn
                .lock()
                .map_err(|e| StorageError::connection(format!("connection lock poisoned: {}", e)))?;
            let conn = guard
                .as_ref()
                .ok_or_else(|| StorageError::connection("store is closed"))?;
            f(conn).map_err(StorageError::from)
        })
        .await
        .map_err(|e| StorageError::internal(format!("store task failed: {}", e)))?
    }

    /// Closes the underlying connection. Every later call fails with
    /// [`StorageError::Connection`]; closing again is a no-op.
    pub fn close(&self) -> StorageResult<()> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|e| StorageError::connection(format!("connection lock poisoned: {}", e)))?;

        let Some(conn) = guard.take() else {
            return Ok(());
        };

        conn.close()
            .map_err(|(_, e)| StorageError::connection(format!("failed to close: {}", e)))?;
        tracing::info!("Closed SQLite catalog store");
        Ok(())
    }
}

fn manufacturer_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Manufacturer> {
    let sub_brands_raw: String = row.get(offset + 6)?;
    let sub_brands: Vec<String> = serde_json::from_str(&sub_brands_raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            offset + 6,
            rusqlite::types::Type::Text,
            Box::new(e),
        )
    })?;

    Ok(Manufacturer {
        id: row.get(offset)?,
        manu_name: row.get(offset + 1)?,
        manu_country: row.get(offset + 2)?,
        logo: row.get(offset + 3)?,
        founder: row.get(offset + 4)?,
        headquarters: row.get(offset + 5)?,
        sub_brands,
    })
}

fn vehicle_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        id: row.get(offset)?,
        model_name: row.get(offset + 1)?,
        model_year: row.get(offset + 2)?,
        manufacturer_id: row.get(offset + 3)?,
        image: row.get(offset + 4)?,
        production_years: row.get(offset + 5)?,
        model_years: row.get(offset + 6)?,
        class: row.get(offset + 7)?,
        body_style: row.get(offset + 8)?,
    })
}

fn vehicle_with_name_from_row(row: &Row<'_>) -> rusqlite::Result<VehicleWithManufacturerName> {
    Ok(VehicleWithManufacturerName {
        vehicle: vehicle_from_row(row, 0)?,
        manufacturer: ManufacturerName {
            manu_name: row.get(VEHICLE_COLUMN_COUNT)?,
        },
    })
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: row.get(3)?,
    })
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn list_manufacturers(&self) -> StorageResult<Vec<Manufacturer>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM manufacturers m ORDER BY m.manu_name COLLATE locale ASC, m.id ASC",
                MANUFACTURER_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], |row| manufacturer_from_row(row, 0))?;
            rows.collect()
        })
        .await
    }

    async fn get_manufacturer_with_vehicles(
        &self,
        id: i64,
    ) -> StorageResult<Option<ManufacturerWithVehicles>> {
        self.with_conn(move |conn| {
            let sql = format!("SELECT {} FROM manufacturers m WHERE m.id = ?1", MANUFACTURER_COLUMNS);
            let manufacturer = conn
                .query_row(&sql, params![id], |row| manufacturer_from_row(row, 0))
                .optional()?;

            let Some(manufacturer) = manufacturer else {
                return Ok(None);
            };

            let sql = format!(
                "SELECT {} FROM vehicles v WHERE v.manufacturer_id = ?1 \
                 ORDER BY v.model_year DESC, v.model_name COLLATE locale ASC, v.id ASC",
                VEHICLE_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let models = stmt
                .query_map(params![id], |row| vehicle_from_row(row, 0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(Some(ManufacturerWithVehicles {
                manufacturer,
                models,
            }))
        })
        .await
    }

    async fn list_vehicles(&self) -> StorageResult<Vec<VehicleWithManufacturerName>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {}, m.manu_name FROM vehicles v \
                 JOIN manufacturers m ON m.id = v.manufacturer_id \
                 ORDER BY v.model_year DESC, m.manu_name COLLATE locale ASC, \
                 v.model_name COLLATE locale ASC, v.id ASC",
                VEHICLE_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], vehicle_with_name_from_row)?;
            rows.collect()
        })
        .await
    }

    async fn get_vehicle(&self, id: i64) -> StorageResult<Option<VehicleComplete>> {
        self.with_conn(move |conn| {
            let sql = format!(
                "SELECT {}, {} FROM vehicles v \
                 JOIN manufacturers m ON m.id = v.manufacturer_id \
                 WHERE v.id = ?1",
                VEHICLE_COLUMNS, MANUFACTURER_COLUMNS
            );
            conn.query_row(&sql, params![id], |row| {
                Ok(VehicleComplete {
                    vehicle: vehicle_from_row(row, 0)?,
                    manufacturer: manufacturer_from_row(row, VEHICLE_COLUMN_COUNT)?,
                })
            })
            .optional()
        })
        .await
    }

    async fn search_vehicles(
        &self,
        query: &str,
        limit: usize,
    ) -> StorageResult<Vec<VehicleWithManufacturerName>> {
        let query = query.to_string();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.with_conn(move |conn| {
            let sql = format!(
                "SELECT {}, m.manu_name FROM vehicles v \
                 JOIN manufacturers m ON m.id = v.manufacturer_id \
                 WHERE instr(fold(v.model_name), fold(?1)) > 0 \
                    OR instr(fold(m.manu_name), fold(?1)) > 0 \
                 ORDER BY m.manu_name COLLATE locale ASC, v.model_name COLLATE locale ASC, v.id ASC \
                 LIMIT ?2",
                VEHICLE_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![query, limit], vehicle_with_name_from_row)?;
            rows.collect()
        })
        .await
    }

    async fn list_posts(&self) -> StorageResult<Vec<Post>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, content, created_at FROM posts \
                 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt.query_map([], post_from_row)?;
            rows.collect()
        })
        .await
    }

    async fn create_post(&self, post: NewPost) -> StorageResult<Post> {
        let created_at = Utc::now();

        self.with_conn(move |conn| {
            conn.query_row(
                "INSERT INTO posts (title, content, created_at) VALUES (?1, ?2, ?3) \
                 RETURNING id, title, content, created_at",
                params![post.title, post.content, created_at],
                post_from_row,
            )
        })
        .await
    }

    async fn upsert_manufacturer(&self, manufacturer: &NewManufacturer) -> StorageResult<i64> {
        let sub_brands = serde_json::to_string(&manufacturer.sub_brands)
            .map_err(|e| StorageError::internal(format!("failed to encode sub-brands: {}", e)))?;
        let manufacturer = manufacturer.clone();

        self.with_conn(move |conn| {
            conn.query_row(
                "INSERT INTO manufacturers \
                    (manu_name, manu_country, logo, founder, headquarters, sub_brands) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
                 ON CONFLICT(manu_name) DO UPDATE SET \
                    manu_country = excluded.manu_country, \
                    logo = excluded.logo, \
                    founder = excluded.founder, \
                    headquarters = excluded.headquarters, \
                    sub_brands = excluded.sub_brands \
                 RETURNING id",
                params![
                    manufacturer.manu_name,
                    manufacturer.manu_country,
                    manufacturer.logo,
                    manufacturer.founder,
                    manufacturer.headquarters,
                    sub_brands,
                ],
                |row| row.get(0),
            )
        })
        .await
    }

    async fn upsert_vehicle(
        &self,
        manufacturer_id: i64,
        vehicle: &NewVehicle,
    ) -> StorageResult<i64> {
        let vehicle = vehicle.clone();

        self.with_conn(move |conn| {
            conn.query_row(
                "INSERT INTO vehicles \
                    (model_name, model_year, manufacturer_id, image, production_years, \
                     model_years, class, body_style) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
                 ON CONFLICT(manufacturer_id, model_name, model_year) DO UPDATE SET \
                    image = excluded.image, \
                    production_years = excluded.production_years, \
                    model_years = excluded.model_years, \
                    class = excluded.class, \
                    body_style = excluded.body_style \
                 RETURNING id",
                params![
                    vehicle.model_name,
                    vehicle.model_year,
                    manufacturer_id,
                    vehicle.image,
                    vehicle.production_years,
                    vehicle.model_years,
                    vehicle.class,
                    vehicle.body_style,
                ],
                |row| row.get(0),
            )
        })
        .await
    }
}
