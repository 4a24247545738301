use super::meta::{
    manufacturer_meta, manufacturers_meta, vehicle_meta, vehicles_meta, MANUFACTURER_NOT_FOUND,
    VEHICLE_NOT_FOUND,
};
use super::sort::{sort_vehicles, SortMode};
use super::types::{
    ManufacturerDetailResponse, ManufacturerListResponse, VehicleDetailResponse,
    VehicleListResponse,
};
use crate::error::AppError;
use crate::storage::CatalogStore;

use axum::extract::{Path, Query};
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct VehicleListParams {
    pub sort: Option<String>,
}

/// Path ids that are not integers are treated like ids with no row.
fn parse_id(raw: &str, not_found: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| {
        tracing::debug!("Rejecting non-numeric id '{}'", raw);
        AppError::NotFound(not_found.to_string())
    })
}

pub async fn handle_list_manufacturers(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
) -> Json<ManufacturerListResponse> {
    let manufacturers = match store.list_manufacturers().await {
        Ok(manufacturers) => manufacturers,
        Err(e) => {
            tracing::error!("Failed to fetch manufacturers: {}", e);
            Vec::new()
        }
    };

    Json(ManufacturerListResponse {
        meta: manufacturers_meta(),
        count: manufacturers.len(),
        manufacturers,
    })
}

pub async fn handle_get_manufacturer(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    Path(id): Path<String>,
) -> Result<Json<ManufacturerDetailResponse>, AppError> {
    let id = parse_id(&id, MANUFACTURER_NOT_FOUND)?;

    let manufacturer = store
        .get_manufacturer_with_vehicles(id)
        .await
        .map_err(|e| AppError::internal("Failed to fetch manufacturer", e))?
        .ok_or_else(|| AppError::NotFound(MANUFACTURER_NOT_FOUND.to_string()))?;

    Ok(Json(ManufacturerDetailResponse {
        meta: manufacturer_meta(&manufacturer.manufacturer.manu_name),
        manufacturer,
    }))
}

pub async fn handle_list_vehicles(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    Query(params): Query<VehicleListParams>,
) -> Json<VehicleListResponse> {
    let mode = SortMode::parse_or_default(params.sort.as_deref());

    let fetched = match store.list_vehicles().await {
        Ok(vehicles) => vehicles,
        Err(e) => {
            tracing::error!("Failed to fetch vehicles: {}", e);
            Vec::new()
        }
    };
    let vehicles = sort_vehicles(&fetched, mode);

    Json(VehicleListResponse {
        meta: vehicles_meta(),
        sort: mode.to_string(),
        count: vehicles.len(),
        vehicles,
    })
}

pub async fn handle_get_vehicle(
    Extension(store): Extension<Arc<dyn CatalogStore>>,
    Path(id): Path<String>,
) -> Result<Json<VehicleDetailResponse>, AppError> {
    let id = parse_id(&id, VEHICLE_NOT_FOUND)?;

    let vehicle = store
        .get_vehicle(id)
        .await
        .map_err(|e| AppError::internal("Failed to fetch vehicle", e))?
        .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))?;

    Ok(Json(VehicleDetailResponse {
        meta: vehicle_meta(&vehicle),
        vehicle,
    }))
}
