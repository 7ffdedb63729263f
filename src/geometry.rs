/// Mean Earth radius used for the equirectangular offset approximation.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Largest radius served by a single circle. Beyond this a lone query
/// regularly hits the provider's 20-result cap.
pub const SINGLE_CIRCLE_MAX_RADIUS_M: f64 = 800.0;

/// Sub-circle radius as a fraction of the requested radius.
pub const SUB_RADIUS_RATIO: f64 = 0.55;
/// Ring circle offset from the center as a fraction of the requested radius.
pub const RING_OFFSET_RATIO: f64 = 0.5;
pub const RING_SIZE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchCircle {
    pub center: GeoPoint,
    pub radius_m: f64,
}

/// Cover a search area with circles small enough to stay under the
/// per-query result cap.
///
/// Radii up to 800 m are returned as a single circle. Larger radii become
/// seven circles of `radius × 0.55`: one on the center and a ring of six at
/// 60° steps, each offset by `radius × 0.5`. The sub-radius exceeds half the
/// ring spacing, so neighbours overlap and the hexagonal cover has no gaps.
///
/// Offsets use the equirectangular approximation, which breaks down near the
/// poles where `cos(lat)` approaches zero.
pub fn generate_search_circles(center: GeoPoint, radius_m: f64) -> Vec<SearchCircle> {
    if radius_m <= SINGLE_CIRCLE_MAX_RADIUS_M {
        return vec![SearchCircle { center, radius_m }];
    }

    let sub_radius = largest_circle_radius(radius_m);
    let offset = radius_m * RING_OFFSET_RATIO;
    let cos_lat = center.latitude.to_radians().cos();

    let mut circles = Vec::with_capacity(RING_SIZE + 1);
    circles.push(SearchCircle {
        center,
        radius_m: sub_radius,
    });

    for i in 0..RING_SIZE {
        let angle = ((i * 60) as f64).to_radians();
        let d_lat = offset * angle.cos() / EARTH_RADIUS_M;
        let d_lng = offset * angle.sin() / (EARTH_RADIUS_M * cos_lat);

        circles.push(SearchCircle {
            center: GeoPoint {
                latitude: center.latitude + d_lat.to_degrees(),
                longitude: center.longitude + d_lng.to_degrees(),
            },
            radius_m: sub_radius,
        });
    }

    circles
}

/// Radius of the biggest circle `generate_search_circles` emits for `radius_m`.
pub fn largest_circle_radius(radius_m: f64) -> f64 {
    if radius_m <= SINGLE_CIRCLE_MAX_RADIUS_M {
        radius_m
    } else {
        radius_m * SUB_RADIUS_RATIO
    }
}
