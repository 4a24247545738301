use crate::catalog::types::{PageMeta, VehicleWithManufacturerName};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub meta: PageMeta,
    pub query: String,
    pub count: usize,
    pub results: Vec<VehicleWithManufacturerName>,
}

/// What a search front-end currently shows.
///
/// `query` and `results` always belong to the same (most recently dispatched) search;
/// `seq` is that search's sequence number, 0 before any search completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchSnapshot {
    pub query: String,
    pub results: Vec<VehicleWithManufacturerName>,
    pub is_searching: bool,
    pub seq: u64,
}
