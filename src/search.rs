//! Multi-circle nearby bar search.
//!
//! A request radius is tiled into circles (see [`generate_search_circles`]),
//! each circle is queried concurrently, and the results are normalized and
//! merged so every place appears once.

use std::collections::HashMap;

use futures::future::try_join_all;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::classify::classify_place;
use crate::geometry::{generate_search_circles, GeoPoint};
use crate::models::{BarSearchPayload, CoordinateInfo, NormalizedBar};
use crate::places::{NearbySearch, PlacesError, RawPlace};

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query_place_id=";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Search for bars around `center`, fanning out one query per circle.
///
/// The first failing circle aborts the whole search; no partial results
/// are returned.
pub(crate) async fn search_bars(
    places: &dyn NearbySearch,
    center: GeoPoint,
    radius_m: f64,
) -> Result<BarSearchPayload, PlacesError> {
    let circles = generate_search_circles(center, radius_m);
    log::debug!(
        "Searching {} circle(s) around {},{} (radius {radius_m} m)",
        circles.len(),
        center.latitude,
        center.longitude
    );

    let batches = try_join_all(circles.iter().map(|c| places.search_circle(c))).await?;
    let raw_count: usize = batches.iter().map(Vec::len).sum();
    let bars = merge_places(batches.into_iter().flatten());

    log::info!(
        "Bar search at {},{}: {} circle(s), {raw_count} raw result(s), {} unique",
        center.latitude,
        center.longitude,
        circles.len(),
        bars.len()
    );

    Ok(BarSearchPayload {
        center: CoordinateInfo {
            lat: center.latitude,
            lng: center.longitude,
        },
        radius: radius_m,
        circles_used: circles.len(),
        count: bars.len(),
        bars,
    })
}

/// Normalize places in order and keep one bar per place id.
///
/// A repeated id overwrites the earlier bar in place, so the output keeps
/// first-seen order with last-seen values.
pub(crate) fn merge_places(raw: impl IntoIterator<Item = RawPlace>) -> Vec<NormalizedBar> {
    let mut bars: Vec<NormalizedBar> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for bar in raw.into_iter().filter_map(normalize_place) {
        match index.get(&bar.place_id) {
            Some(&i) => bars[i] = bar,
            None => {
                index.insert(bar.place_id.clone(), bars.len());
                bars.push(bar);
            }
        }
    }

    bars
}

/// Convert a provider record into a bar. Records without an id or a
/// usable location are dropped.
pub(crate) fn normalize_place(raw: RawPlace) -> Option<NormalizedBar> {
    if raw.id.is_empty() {
        return None;
    }
    let location = raw
        .location
        .filter(|l| l.latitude.is_finite() && l.longitude.is_finite())?;

    let types = raw.types.unwrap_or_default();
    let category = classify_place(raw.primary_type.as_deref(), &types);
    let maps_url = raw.google_maps_uri.unwrap_or_else(|| {
        format!("{MAPS_SEARCH_URL}{}", utf8_percent_encode(&raw.id, URI_COMPONENT))
    });

    Some(NormalizedBar {
        name: raw
            .display_name
            .and_then(|n| n.text)
            .unwrap_or_else(|| "Unknown".to_string()),
        address: raw
            .short_formatted_address
            .or(raw.formatted_address)
            .unwrap_or_default(),
        lat: location.latitude,
        lng: location.longitude,
        rating: raw.rating,
        ratings_total: raw.user_rating_count,
        price_level: raw.price_level.and_then(|p| p.tier()),
        status: raw.business_status,
        maps_url,
        primary_type: raw.primary_type,
        types,
        category,
        place_id: raw.id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Category;
    use crate::geometry::SearchCircle;
    use crate::places::{LatLng, LocalizedText, PriceLevel};
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn place(id: &str, name: &str) -> RawPlace {
        RawPlace {
            id: id.to_string(),
            display_name: Some(LocalizedText {
                text: Some(name.to_string()),
            }),
            location: Some(LatLng {
                latitude: 40.71,
                longitude: -74.0,
            }),
            ..RawPlace::default()
        }
    }

    /// Answers each circle from a fixed script, in call order.
    struct ScriptedSearch {
        batches: Mutex<Vec<Result<Vec<RawPlace>, PlacesError>>>,
        calls: Mutex<Vec<SearchCircle>>,
    }

    impl ScriptedSearch {
        fn new(batches: Vec<Result<Vec<RawPlace>, PlacesError>>) -> Self {
            Self {
                batches: Mutex::new(batches),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self::new(Vec::new())
        }
    }

    #[async_trait]
    impl NearbySearch for ScriptedSearch {
        async fn search_circle(
            &self,
            circle: &SearchCircle,
        ) -> Result<Vec<RawPlace>, PlacesError> {
            self.calls.lock().unwrap().push(*circle);
            let mut batches = self.batches.lock().unwrap();
            if batches.is_empty() {
                Ok(Vec::new())
            } else {
                batches.remove(0)
            }
        }
    }

    const NYC: GeoPoint = GeoPoint {
        latitude: 40.7128,
        longitude: -74.0060,
    };

    #[test]
    fn normalize_applies_defaults() {
        let raw = RawPlace {
            id: "ChIJ a/b".into(),
            location: Some(LatLng {
                latitude: 1.0,
                longitude: 2.0,
            }),
            formatted_address: Some("1 Long Street, Town, Country".into()),
            ..RawPlace::default()
        };
        let bar = normalize_place(raw).unwrap();
        assert_eq!(bar.name, "Unknown");
        assert_eq!(bar.address, "1 Long Street, Town, Country");
        assert_eq!(
            bar.maps_url,
            "https://www.google.com/maps/search/?api=1&query_place_id=ChIJ%20a%2Fb"
        );
        assert_eq!(bar.category, Category::Other);
        assert!(bar.types.is_empty());
        assert_eq!(bar.price_level, None);
    }

    #[test]
    fn nameless_display_name_falls_back_to_unknown() {
        let raw = RawPlace {
            display_name: Some(LocalizedText { text: None }),
            ..place("p1", "ignored")
        };
        assert_eq!(normalize_place(raw).unwrap().name, "Unknown");
    }

    #[test]
    fn normalize_prefers_short_address_and_maps_price() {
        let raw = RawPlace {
            short_formatted_address: Some("1 Long St".into()),
            formatted_address: Some("1 Long Street, Town, Country".into()),
            price_level: Some(PriceLevel::PriceLevelModerate),
            google_maps_uri: Some("https://maps.google.com/?cid=1".into()),
            primary_type: Some("wine_bar".into()),
            user_rating_count: Some(312),
            rating: Some(4.6),
            business_status: Some("OPERATIONAL".into()),
            ..place("p1", "Corkscrew")
        };
        let bar = normalize_place(raw).unwrap();
        assert_eq!(bar.address, "1 Long St");
        assert_eq!(bar.price_level, Some(2));
        assert_eq!(bar.maps_url, "https://maps.google.com/?cid=1");
        assert_eq!(bar.category, Category::Bar);
        assert_eq!(bar.ratings_total, Some(312));
        assert_eq!(bar.status.as_deref(), Some("OPERATIONAL"));
    }

    #[test]
    fn places_without_location_or_id_are_dropped() {
        let no_location = RawPlace {
            location: None,
            ..place("p1", "Nowhere")
        };
        let no_id = place("", "Anonymous");
        assert!(normalize_place(no_location.clone()).is_none());
        assert!(normalize_place(no_id.clone()).is_none());

        let merged = merge_places(vec![no_location, no_id, place("p2", "Somewhere")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].place_id, "p2");
    }

    #[test]
    fn duplicate_ids_keep_the_last_occurrence() {
        let merged = merge_places(vec![
            place("a", "Old Name"),
            place("b", "Other"),
            place("a", "New Name"),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].place_id, "a");
        assert_eq!(merged[0].name, "New Name");
        assert_eq!(merged[1].place_id, "b");
    }

    #[actix_web::test]
    async fn large_radius_queries_seven_circles() {
        let places = ScriptedSearch::empty();
        let payload = search_bars(&places, NYC, 1500.0).await.unwrap();

        assert_eq!(payload.circles_used, 7);
        assert_eq!(payload.count, 0);
        assert!(payload.bars.is_empty());
        assert_eq!(payload.center, CoordinateInfo { lat: 40.7128, lng: -74.006 });
        assert_eq!(payload.radius, 1500.0);

        let calls = places.calls.lock().unwrap();
        assert_eq!(calls.len(), 7);
        assert_eq!(calls[0].center, NYC);
    }

    #[actix_web::test]
    async fn small_radius_queries_one_circle() {
        let places = ScriptedSearch::empty();
        let payload = search_bars(&places, NYC, 500.0).await.unwrap();

        assert_eq!(payload.circles_used, 1);
        let calls = places.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].radius_m, 500.0);
    }

    #[actix_web::test]
    async fn overlapping_circles_are_deduplicated_later_circle_wins() {
        let places = ScriptedSearch::new(vec![
            Ok(vec![place("shared", "First Circle"), place("only-first", "A")]),
            Ok(vec![
                RawPlace {
                    location: None,
                    ..place("no-location", "B")
                },
                place("shared", "Second Circle"),
            ]),
        ]);
        let payload = search_bars(&places, NYC, 2000.0).await.unwrap();

        assert_eq!(payload.count, 2);
        assert_eq!(payload.bars.len(), 2);
        let shared = payload.bars.iter().find(|b| b.place_id == "shared").unwrap();
        assert_eq!(shared.name, "Second Circle");
    }

    #[actix_web::test]
    async fn one_failing_circle_fails_the_search() {
        let places = ScriptedSearch::new(vec![
            Ok(vec![place("a", "A")]),
            Err(PlacesError::Status {
                status: 500,
                body: "backend error".into(),
            }),
        ]);
        let err = search_bars(&places, NYC, 1500.0).await.unwrap_err();
        assert!(matches!(err, PlacesError::Status { status: 500, .. }));
    }
}
