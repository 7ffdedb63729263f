use serde::Serialize;
use utoipa::ToSchema;

use crate::classify::Category;
use crate::models::CheckStatus;

#[derive(Serialize, ToSchema)]
pub struct HealthPayload {
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct CoordinateInfo {
    pub lat: f64,
    pub lng: f64,
}

/// A place returned by the nearby search, merged across circles.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBar {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub rating: Option<f64>,
    pub ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub status: Option<String>,
    pub maps_url: String,
    pub primary_type: Option<String>,
    pub types: Vec<String>,
    pub category: Category,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BarSearchPayload {
    pub center: CoordinateInfo,
    pub radius: f64,
    pub circles_used: usize,
    pub count: usize,
    pub bars: Vec<NormalizedBar>,
}

/// A row of the checklist tab.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistBar {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<f64>,
    pub ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub status: Option<String>,
    pub maps_url: String,
    pub check_status: CheckStatus,
    pub category: Category,
}

#[derive(Serialize, ToSchema)]
pub struct ChecklistPayload {
    pub bars: Vec<ChecklistBar>,
}

#[derive(Serialize, ToSchema)]
pub struct WriteAck {
    pub ok: bool,
    pub count: usize,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusAck {
    pub ok: bool,
    pub place_id: String,
    pub check_status: CheckStatus,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetAck {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Hint {
    pub text: String,
    pub timestamp: String,
}

#[derive(Serialize, ToSchema)]
pub struct HintsPayload {
    pub hints: Vec<Hint>,
}

#[derive(Serialize, ToSchema)]
pub struct HintAck {
    pub ok: bool,
    pub hint: String,
    pub timestamp: String,
}

#[derive(Serialize, ToSchema)]
pub struct OkPayload {
    pub ok: bool,
}
