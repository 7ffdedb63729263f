use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::Validate;

pub const DEFAULT_SEARCH_RADIUS_M: f64 = 1500.0;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BarsQuery {
    #[validate(custom(function = "crate::validation::validate_lat"))]
    pub lat: f64,
    #[validate(custom(function = "crate::validation::validate_lng"))]
    pub lng: f64,
    /// Search radius in meters. Absent or empty means the default.
    #[serde(default = "default_radius", deserialize_with = "radius_or_default")]
    #[validate(custom(function = "crate::validation::validate_radius_field"))]
    pub radius: f64,
}

fn default_radius() -> f64 {
    DEFAULT_SEARCH_RADIUS_M
}

fn radius_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("radius must be a number, got {raw:?}"))),
        _ => Ok(DEFAULT_SEARCH_RADIUS_M),
    }
}

/// Full replacement of the checklist tab.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChecklistWriteBody {
    #[serde(default)]
    pub bars: Option<Vec<ChecklistBarInput>>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistBarInput {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<f64>,
    pub ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    pub status: Option<String>,
    pub maps_url: Option<String>,
    /// Written as given; unknown values read back as the default.
    pub check_status: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusUpdateBody {
    pub place_id: Option<String>,
    pub check_status: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct HintBody {
    pub hint: Option<String>,
}
