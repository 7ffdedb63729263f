use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{
    NearbySearch, PlacesError, RawPlace, SearchNearbyRequest, SearchNearbyResponse, FIELD_MASK,
};
use crate::geometry::SearchCircle;

const SEARCH_NEARBY_PATH: &str = "/v1/places:searchNearby";

/// HTTP client for the Places `searchNearby` endpoint.
///
/// Every call is bounded by the client-wide timeout; a timed-out call fails
/// like any other transport error.
pub(crate) struct PlacesClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl PlacesClient {
    pub fn new(base_url: &str, api_key: String, timeout_secs: u64) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}{SEARCH_NEARBY_PATH}", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl NearbySearch for PlacesClient {
    async fn search_circle(&self, circle: &SearchCircle) -> Result<Vec<RawPlace>, PlacesError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&SearchNearbyRequest::for_circle(circle))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PlacesError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: SearchNearbyResponse = resp.json().await?;
        Ok(data.places.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeoPoint;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn circle() -> SearchCircle {
        SearchCircle {
            center: GeoPoint {
                latitude: 40.7128,
                longitude: -74.006,
            },
            radius_m: 500.0,
        }
    }

    fn client_for(server: &MockServer) -> PlacesClient {
        PlacesClient::new(&server.uri(), "test-key".into(), 5).expect("client builds")
    }

    #[tokio::test]
    async fn sends_key_field_mask_and_bar_filter() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/places:searchNearby"))
            .and(header("X-Goog-Api-Key", "test-key"))
            .and(body_partial_json(json!({
                "includedTypes": ["bar"],
                "maxResultCount": 20,
                "locationRestriction": { "circle": { "radius": 500.0 } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "places": [
                    { "id": "p1", "displayName": { "text": "The Dead Rabbit" } },
                    { "id": "p2" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let places = client_for(&server).search_circle(&circle()).await.unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].id, "p1");
        assert_eq!(
            places[0].display_name.as_ref().unwrap().text.as_deref(),
            Some("The Dead Rabbit")
        );

        let requests = server.received_requests().await.unwrap();
        let mask = requests[0]
            .headers
            .get("x-goog-fieldmask")
            .and_then(|v| v.to_str().ok());
        assert_eq!(mask, Some(FIELD_MASK));
    }

    #[tokio::test]
    async fn empty_response_is_no_places() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let places = client_for(&server).search_circle(&circle()).await.unwrap();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn non_success_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = client_for(&server).search_circle(&circle()).await.unwrap_err();
        match err {
            PlacesError::Status { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "API key not valid");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }
}
