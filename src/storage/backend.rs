//! Catalog Store Interface
//!
//! Every read and write the service performs goes through [`CatalogStore`]. The HTTP layer,
//! the search service and the seed importer only ever see `Arc<dyn CatalogStore>`, so the
//! SQLite implementation can be swapped for a test double.

use async_trait::async_trait;

use super::error::StorageResult;
use crate::catalog::types::{
    Manufacturer, ManufacturerWithVehicles, NewManufacturer, NewVehicle, VehicleComplete,
    VehicleWithManufacturerName,
};
use crate::posts::types::{NewPost, Post};

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All manufacturers, ordered by name ascending.
    async fn list_manufacturers(&self) -> StorageResult<Vec<Manufacturer>>;

    /// One manufacturer with its models (model year descending).
    ///
    /// Returns `None` if no manufacturer has this id.
    async fn get_manufacturer_with_vehicles(
        &self,
        id: i64,
    ) -> StorageResult<Option<ManufacturerWithVehicles>>;

    /// All vehicles with their manufacturer's name, ordered by model year descending,
    /// then manufacturer name and model name ascending.
    async fn list_vehicles(&self) -> StorageResult<Vec<VehicleWithManufacturerName>>;

    /// One vehicle with its full manufacturer record.
    async fn get_vehicle(&self, id: i64) -> StorageResult<Option<VehicleComplete>>;

    /// Vehicles whose model name or manufacturer name contains `query`, ignoring case.
    ///
    /// Ordered by manufacturer name then model name, at most `limit` rows.
    async fn search_vehicles(
        &self,
        query: &str,
        limit: usize,
    ) -> StorageResult<Vec<VehicleWithManufacturerName>>;

    /// All posts, newest first.
    async fn list_posts(&self) -> StorageResult<Vec<Post>>;

    /// Inserts a post and returns it with its id and creation time.
    async fn create_post(&self, post: NewPost) -> StorageResult<Post>;

    /// Inserts or updates a manufacturer keyed by name. Returns its id.
    async fn upsert_manufacturer(&self, manufacturer: &NewManufacturer) -> StorageResult<i64>;

    /// Inserts or updates a vehicle keyed by (manufacturer, model name, model year).
    async fn upsert_vehicle(&self, manufacturer_id: i64, vehicle: &NewVehicle)
        -> StorageResult<i64>;
}
