use actix_web::{web, HttpResponse, Result as ActixResult};
use validator::Validate;

use crate::errors::AppError;
use crate::geometry::GeoPoint;
use crate::models::{BarSearchPayload, BarsQuery};
use crate::places::PlacesError;
use crate::search::search_bars;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/bars",
    tag = "Bars",
    params(
        ("lat" = f64, Query),
        ("lng" = f64, Query),
        ("radius" = Option<f64>, Query,
            description = "Radius in meters (default: 1500). Each tiled circle must stay within 50000")
    ),
    responses(
        (status = 200, description = "Unique bars around the point", body = BarSearchPayload),
        (status = 400, description = "Invalid coordinates or radius"),
        (status = 500, description = "Places API key not configured"),
        (status = 502, description = "Places API failure")
    )
)]
pub async fn nearby_bars(
    state: web::Data<AppState>,
    query: web::Query<BarsQuery>,
) -> ActixResult<HttpResponse> {
    query.validate().map_err(|e| {
        AppError::Validation(format!("Validation failed: {e}"))
    })?;

    let places = state.places()?;
    let center = GeoPoint {
        latitude: query.lat,
        longitude: query.lng,
    };

    let search = search_bars(places, center, query.radius);
    let payload = tokio::time::timeout(state.search_timeout, search)
        .await
        .map_err(|_| PlacesError::Timeout {
            secs: state.search_timeout.as_secs(),
        })
        .and_then(|result| result)
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(payload))
}
