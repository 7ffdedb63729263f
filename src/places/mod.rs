//! Nearby search against the Google Places API (New).

mod client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::SearchCircle;

pub(crate) use client::PlacesClient;

/// Type filter sent with every nearby search.
pub const INCLUDED_TYPES: &[&str] = &["bar"];

/// Provider cap on results per nearby search.
pub const MAX_RESULT_COUNT: u32 = 20;

/// Response fields requested from the provider. Anything outside this mask
/// is never returned.
pub const FIELD_MASK: &str = "places.id,\
places.displayName,\
places.formattedAddress,\
places.shortFormattedAddress,\
places.location,\
places.rating,\
places.userRatingCount,\
places.priceLevel,\
places.businessStatus,\
places.googleMapsUri,\
places.primaryType,\
places.types";

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("Google Places request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google Places HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Google Places search timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// One nearby query per circle.
#[async_trait]
pub(crate) trait NearbySearch: Send + Sync {
    async fn search_circle(&self, circle: &SearchCircle) -> Result<Vec<RawPlace>, PlacesError>;
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    #[serde(default)]
    pub id: String,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub short_formatted_address: Option<String>,
    pub location: Option<LatLng>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub price_level: Option<PriceLevel>,
    pub business_status: Option<String>,
    pub google_maps_uri: Option<String>,
    pub primary_type: Option<String>,
    pub types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceLevel {
    PriceLevelFree,
    PriceLevelInexpensive,
    PriceLevelModerate,
    PriceLevelExpensive,
    PriceLevelVeryExpensive,
    #[serde(other)]
    Unspecified,
}

impl PriceLevel {
    /// Ordinal tier 0–4, `None` for unspecified.
    pub fn tier(self) -> Option<u8> {
        match self {
            Self::PriceLevelFree => Some(0),
            Self::PriceLevelInexpensive => Some(1),
            Self::PriceLevelModerate => Some(2),
            Self::PriceLevelExpensive => Some(3),
            Self::PriceLevelVeryExpensive => Some(4),
            Self::Unspecified => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchNearbyResponse {
    #[serde(default)]
    pub places: Option<Vec<RawPlace>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchNearbyRequest<'a> {
    pub included_types: &'a [&'a str],
    pub max_result_count: u32,
    pub location_restriction: LocationRestriction,
}

#[derive(Debug, Serialize)]
pub(crate) struct LocationRestriction {
    pub circle: CircleRestriction,
}

#[derive(Debug, Serialize)]
pub(crate) struct CircleRestriction {
    pub center: LatLng,
    pub radius: f64,
}

impl SearchNearbyRequest<'static> {
    pub fn for_circle(circle: &SearchCircle) -> Self {
        Self {
            included_types: INCLUDED_TYPES,
            max_result_count: MAX_RESULT_COUNT,
            location_restriction: LocationRestriction {
                circle: CircleRestriction {
                    center: LatLng {
                        latitude: circle.center.latitude,
                        longitude: circle.center.longitude,
                    },
                    radius: circle.radius_m,
                },
            },
        }
    }
}
