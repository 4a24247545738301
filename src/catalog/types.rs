//! Catalog Data Types
//!
//! Entities of the catalog (manufacturers and their vehicle models) plus the joined
//! shapes that the list, detail and search pages return.
//!
//! Wire names are camelCase (`manuName`, `modelYear`, ...) so the JSON matches what
//! existing front-ends of the catalog already consume.

use serde::{Deserialize, Serialize};

/// A car maker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    pub id: i64,
    pub manu_name: String,
    pub manu_country: String,
    pub logo: Option<String>,
    pub founder: Option<String>,
    pub headquarters: Option<String>,
    /// Order is not meaningful.
    pub sub_brands: Vec<String>,
}

/// A vehicle model. Always belongs to exactly one [`Manufacturer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub model_name: String,
    /// Display text. Not guaranteed to be numeric (e.g. "2019-2023").
    pub model_year: String,
    pub manufacturer_id: i64,
    pub image: Option<String>,
    pub production_years: Option<String>,
    pub model_years: Option<String>,
    pub class: Option<String>,
    pub body_style: Option<String>,
}

/// The only manufacturer field carried alongside list and search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerName {
    pub manu_name: String,
}

/// Vehicle joined with its manufacturer's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleWithManufacturerName {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub manufacturer: ManufacturerName,
}

impl VehicleWithManufacturerName {
    pub fn model_name(&self) -> &str {
        &self.vehicle.model_name
    }

    pub fn model_year(&self) -> &str {
        &self.vehicle.model_year
    }

    pub fn manu_name(&self) -> &str {
        &self.manufacturer.manu_name
    }
}

/// Vehicle joined with its full manufacturer record (vehicle detail page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleComplete {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub manufacturer: Manufacturer,
}

/// Manufacturer with all of its models (manufacturer detail page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerWithVehicles {
    #[serde(flatten)]
    pub manufacturer: Manufacturer,
    pub models: Vec<Vehicle>,
}

/// Manufacturer fields supplied by an import, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewManufacturer {
    pub manu_name: String,
    pub manu_country: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub founder: Option<String>,
    #[serde(default)]
    pub headquarters: Option<String>,
    #[serde(default)]
    pub sub_brands: Vec<String>,
}

/// Vehicle fields supplied by an import. The owning manufacturer is given separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVehicle {
    pub model_name: String,
    pub model_year: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub production_years: Option<String>,
    #[serde(default)]
    pub model_years: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub body_style: Option<String>,
}

/// Title and description of a rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManufacturerListResponse {
    pub meta: PageMeta,
    pub count: usize,
    pub manufacturers: Vec<Manufacturer>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManufacturerDetailResponse {
    pub meta: PageMeta,
    pub manufacturer: ManufacturerWithVehicles,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleListResponse {
    pub meta: PageMeta,
    pub sort: String,
    pub count: usize,
    pub vehicles: Vec<VehicleWithManufacturerName>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VehicleDetailResponse {
    pub meta: PageMeta,
    pub vehicle: VehicleComplete,
}
