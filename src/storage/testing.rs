//! Store test doubles: fault injection and call counting.

use super::backend::CatalogStore;
use super::error::{StorageError, StorageResult};
use super::sqlite::SqliteStore;
use crate::catalog::types::{
    Manufacturer, ManufacturerWithVehicles, NewManufacturer, NewVehicle, VehicleComplete,
    VehicleWithManufacturerName,
};
use crate::posts::types::{NewPost, Post};

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A store whose every call fails, as if the database were unreachable.
pub struct FailingStore;

fn unavailable<T>() -> StorageResult<T> {
    Err(StorageError::connection("database unavailable"))
}

#[async_trait]
impl CatalogStore for FailingStore {
    async fn list_manufacturers(&self) -> StorageResult<Vec<Manufacturer>> {
        unavailable()
    }

    async fn get_manufacturer_with_vehicles(
        &self,
        _id: i64,
    ) -> StorageResult<Option<ManufacturerWithVehicles>> {
        unavailable()
    }

    async fn list_vehicles(&self) -> StorageResult<Vec<VehicleWithManufacturerName>> {
        unavailable()
    }

    async fn get_vehicle(&self, _id: i64) -> StorageResult<Option<VehicleComplete>> {
        unavailable()
    }

    async fn search_vehicles(
        &self,
        _query: &str,
        _limit: usize,
    ) -> StorageResult<Vec<VehicleWithManufacturerName>> {
        unavailable()
    }

    async fn list_posts(&self) -> StorageResult<Vec<Post>> {
        unavailable()
    }

    async fn create_post(&self, _post: NewPost) -> StorageResult<Post> {
        unavailable()
    }

    async fn upsert_manufacturer(&self, _manufacturer: &NewManufacturer) -> StorageResult<i64> {
        unavailable()
    }

    async fn upsert_vehicle(
        &self,
        _manufacturer_id: i64,
        _vehicle: &NewVehicle,
    ) -> StorageResult<i64> {
        unavailable()
    }
}

/// Wraps a store and counts how many calls reach it.
pub struct CountingStore<S> {
    inner: S,
    calls: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<S: CatalogStore> CatalogStore for CountingStore<S> {
    async fn list_manufacturers(&self) -> StorageResult<Vec<Manufacturer>> {
        self.hit();
        self.inner.list_manufacturers().await
    }

    async fn get_manufacturer_with_vehicles(
        &self,
        id: i64,
    ) -> StorageResult<Option<ManufacturerWithVehicles>> {
        self.hit();
        self.inner.get_manufacturer_with_vehicles(id).await
    }

    async fn list_vehicles(&self) -> StorageResult<Vec<VehicleWithManufacturerName>> {
        self.hit();
        self.inner.list_vehicles().await
    }

    async fn get_vehicle(&self, id: i64) -> StorageResult<Option<VehicleComplete>> {
        self.hit();
        self.inner.get_vehicle(id).await
    }

    async fn search_vehicles(
        &self,
        query: &str,
        limit: usize,
    ) -> StorageResult<Vec<VehicleWithManufacturerName>> {
        self.hit();
        self.inner.search_vehicles(query, limit).await
    }

    async fn list_posts(&self) -> StorageResult<Vec<Post>> {
        self.hit();
        self.inner.list_posts().await
    }

    async fn create_post(&self, post: NewPost) -> StorageResult<Post> {
        self.hit();
        self.inner.create_post(post).await
    }

    async fn upsert_manufacturer(&self, manufacturer: &NewManufacturer) -> StorageResult<i64> {
        self.hit();
        self.inner.upsert_manufacturer(manufacturer).await
    }

    async fn upsert_vehicle(
        &self,
        manufacturer_id: i64,
        vehicle: &NewVehicle,
    ) -> StorageResult<i64> {
        self.hit();
        self.inner.upsert_vehicle(manufacturer_id, vehicle).await
    }
}

pub fn manufacturer(name: &str, country: &str) -> NewManufacturer {
    NewManufacturer {
        manu_name: name.to_string(),
        manu_country: country.to_string(),
        logo: None,
        founder: None,
        headquarters: None,
        sub_brands: vec![],
    }
}

pub fn model(name: &str, year: &str) -> NewVehicle {
    NewVehicle {
        model_name: name.to_string(),
        model_year: year.to_string(),
        image: None,
        production_years: None,
        model_years: None,
        class: None,
        body_style: None,
    }
}

/// In-memory store holding a small catalog:
///
/// | Make       | Models                                   |
/// |------------|------------------------------------------|
/// | Toyota     | Corolla 2020, Supra 2021, Land Cruiser 1990s |
/// | Ford       | Mustang 2019, Focus 2018                 |
/// | Volkswagen | Golf 2021, Corrado 1992                  |
pub async fn seeded_store() -> Arc<SqliteStore> {
    let store = SqliteStore::open_in_memory().unwrap();

    let toyota = store
        .upsert_manufacturer(&NewManufacturer {
            founder: Some("Kiichiro Toyoda".to_string()),
            headquarters: Some("Toyota City".to_string()),
            sub_brands: vec!["Lexus".to_string(), "Daihatsu".to_string()],
            ..manufacturer("Toyota", "Japan")
        })
        .await
        .unwrap();
    let ford = store
        .upsert_manufacturer(&manufacturer("Ford", "United States"))
        .await
        .unwrap();
    let vw = store
        .upsert_manufacturer(&manufacturer("Volkswagen", "Germany"))
        .await
        .unwrap();

    for (make, name, year) in [
        (toyota, "Corolla", "2020"),
        (toyota, "Supra", "2021"),
        (toyota, "Land Cruiser", "1990s"),
        (ford, "Mustang", "2019"),
        (ford, "Focus", "2018"),
        (vw, "Golf", "2021"),
        (vw, "Corrado", "1992"),
    ] {
        store.upsert_vehicle(make, &model(name, year)).await.unwrap();
    }

    Arc::new(store)
}
