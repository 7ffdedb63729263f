use crate::errors::AppError;
use crate::geometry::largest_circle_radius;
use crate::models::{CheckStatus, StatusUpdateBody};
use validator::ValidationError;

/// Largest circle the Places API accepts for a location restriction.
pub const MAX_CIRCLE_RADIUS_M: f64 = 50_000.0;

pub fn validate_lat(lat: f64) -> Result<(), ValidationError> {
    if !lat.is_finite() || lat < -90.0 || lat > 90.0 {
        return Err(ValidationError::new("latitude"));
    }
    Ok(())
}

pub fn validate_lng(lng: f64) -> Result<(), ValidationError> {
    if !lng.is_finite() || lng < -180.0 || lng > 180.0 {
        return Err(ValidationError::new("longitude"));
    }
    Ok(())
}

pub fn validate_radius_field(radius: f64) -> Result<(), ValidationError> {
    // the limit binds each circle sent upstream, not the requested area
    if !radius.is_finite()
        || radius <= 0.0
        || largest_circle_radius(radius) > MAX_CIRCLE_RADIUS_M
    {
        return Err(ValidationError::new("radius"));
    }
    Ok(())
}

pub fn validate_hint(hint: Option<&str>) -> Result<String, AppError> {
    match hint.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(AppError::Validation("Missing hint text".to_string())),
    }
}

pub fn validate_status_update(body: &StatusUpdateBody) -> Result<(String, CheckStatus), AppError> {
    let place_id = body.place_id.as_deref().filter(|id| !id.is_empty());
    let status = body.check_status.as_deref().filter(|s| !s.is_empty());

    let (Some(place_id), Some(status)) = (place_id, status) else {
        return Err(AppError::Validation(
            "Missing placeId or checkStatus".to_string(),
        ));
    };

    let status = status.parse::<CheckStatus>().map_err(AppError::Validation)?;
    Ok((place_id.to_string(), status))
}
