//! Catalog Seed Import
//!
//! Manufacturers and vehicles are not created through the API; they arrive from a JSON seed
//! file imported at start-up:
//!
//! ```json
//! { "manufacturers": [
//!     { "manuName": "Toyota", "manuCountry": "Japan", "subBrands": ["Lexus"],
//!       "models": [ { "modelName": "Corolla", "modelYear": "2020" } ] } ] }
//! ```
//!
//! Both levels are upserted, so importing the same file twice leaves the catalog unchanged.

use super::backend::CatalogStore;
use super::error::StorageResult;
use crate::catalog::types::{NewManufacturer, NewVehicle};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub manufacturers: Vec<ManufacturerSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManufacturerSeed {
    #[serde(flatten)]
    pub manufacturer: NewManufacturer,
    #[serde(default)]
    pub models: Vec<NewVehicle>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub manufacturers: usize,
    pub vehicles: usize,
}

pub fn parse_seed(json: &str) -> anyhow::Result<CatalogSeed> {
    serde_json::from_str(json).context("Invalid catalog seed JSON")
}

pub async fn load_seed_file(path: &Path) -> anyhow::Result<CatalogSeed> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    parse_seed(&json)
}

/// Upserts every manufacturer, then its models.
///
/// Stops at the first store error. Rows written before the error stay written.
pub async fn apply_seed(store: &dyn CatalogStore, seed: &CatalogSeed) -> StorageResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    for entry in &seed.manufacturers {
        let manufacturer_id = store.upsert_manufacturer(&entry.manufacturer).await?;
        summary.manufacturers += 1;

        for model in &entry.models {
            store.upsert_vehicle(manufacturer_id, model).await?;
            summary.vehicles += 1;
        }

        tracing::debug!(
            "Seeded manufacturer '{}' (id={}) with {} models",
            entry.manufacturer.manu_name,
            manufacturer_id,
            entry.models.len()
        );
    }

    tracing::info!(
        "Catalog seed applied: {} manufacturers, {} vehicles",
        summary.manufacturers,
        summary.vehicles
    );

    Ok(summary)
}
