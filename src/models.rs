//! Request and response records for the inventory REST API
//!
//! Response records only name the fields the scenarios read; anything else the
//! backend returns is ignored during decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Row identifier as returned by the backend.
///
/// Depending on the table an id is either a JSON number or a string (uuid),
/// so both are accepted and written back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => write!(f, "{}", id),
        }
    }
}

// ── Response records ──

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockLogEntry {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub product_id: RecordId,
    #[serde(default)]
    pub date: Option<String>,
}

/// Current price row. Rates are kept as raw JSON so an update can send back
/// exactly what was read, whether the backend encodes numerics as numbers or
/// strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub product_id: RecordId,
    #[serde(default)]
    pub base_rate: Value,
    #[serde(default)]
    pub conversion_factor: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchLogEntry {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(default)]
    pub products: Vec<DispatchProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitDbResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "productCount")]
    pub product_count: Option<u64>,
}

// ── Request payloads ──

/// Stock log column targeted by a `POST stock-log` update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockField {
    Opening,
    SalesOffice,
    Dispatch,
}

#[derive(Debug, Clone, Serialize)]
pub struct StockLogUpdate {
    pub product_id: RecordId,
    pub date: String,
    pub field: StockField,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceUpdate {
    pub product_id: RecordId,
    pub base_rate: Value,
    pub conversion_factor: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchProduct {
    #[serde(rename = "productId")]
    pub product_id: RecordId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchRequest {
    pub route_name: String,
    pub vehicle_number: String,
    pub products: Vec<DispatchProduct>,
    pub date: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleSaleRequest {
    pub stock_log_id: RecordId,
    pub vehicle_number: String,
    pub quantity: u32,
}
