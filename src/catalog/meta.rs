//! Page titles and descriptions for the catalog pages.

use super::types::{PageMeta, VehicleComplete};

pub const SITE_NAME: &str = "Car Encyclopedia";

pub const MANUFACTURER_NOT_FOUND: &str = "Manufacturer Not Found";
pub const VEHICLE_NOT_FOUND: &str = "Vehicle Not Found";

fn page(title: String, description: String) -> PageMeta {
    PageMeta { title, description }
}

pub fn manufacturers_meta() -> PageMeta {
    page(
        format!("Manufacturers - {}", SITE_NAME),
        "Browse car manufacturers.".to_string(),
    )
}

pub fn manufacturer_meta(manu_name: &str) -> PageMeta {
    page(
        format!("{} - {}", manu_name, SITE_NAME),
        format!("Browse models from {}.", manu_name),
    )
}

pub fn vehicles_meta() -> PageMeta {
    page(
        format!("All Models - {}", SITE_NAME),
        "Browse all car models.".to_string(),
    )
}

pub fn vehicle_meta(vehicle: &VehicleComplete) -> PageMeta {
    let model = &vehicle.vehicle.model_name;
    let make = &vehicle.manufacturer.manu_name;
    page(
        format!("{} ({}) - {}", model, make, SITE_NAME),
        format!(
            "Details about the {} {} {}",
            vehicle.vehicle.model_year, make, model
        ),
    )
}

pub fn search_meta() -> PageMeta {
    page(
        format!("Search - {}", SITE_NAME),
        "Search for car models and makes.".to_string(),
    )
}
