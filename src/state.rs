use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::errors::AppError;
use crate::places::{NearbySearch, PlacesClient};
use crate::store::{RowStore, SheetsStore};

/// Collaborators shared by every worker. A collaborator whose configuration
/// is missing stays `None` and its routes answer with a configuration error.
pub(crate) struct AppState {
    pub places: Option<Arc<dyn NearbySearch>>,
    pub store: Option<Arc<dyn RowStore>>,
    pub search_timeout: Duration,
}

impl AppState {
    pub fn from_config(cfg: &Config) -> Self {
        let places = match &cfg.places_api_key {
            Some(key) => {
                match PlacesClient::new(&cfg.places_api_url, key.clone(), cfg.places_timeout_secs) {
                    Ok(client) => Some(Arc::new(client) as Arc<dyn NearbySearch>),
                    Err(err) => {
                        log::error!("Failed to build Places client: {err}");
                        None
                    }
                }
            }
            None => {
                log::warn!("GOOGLE_MAPS_API_KEY is not set; /bars will fail");
                None
            }
        };

        let store = match (&cfg.sheet_id, &cfg.sheets_access_token) {
            (Some(id), Some(token)) => match SheetsStore::new(
                &cfg.sheets_api_url,
                id.clone(),
                token.clone(),
                cfg.sheets_timeout_secs,
            ) {
                Ok(store) => Some(Arc::new(store) as Arc<dyn RowStore>),
                Err(err) => {
                    log::error!("Failed to build Sheets store: {err}");
                    None
                }
            },
            _ => {
                log::warn!(
                    "GOOGLE_SHEET_ID or GOOGLE_SHEETS_ACCESS_TOKEN is not set; sheet and hint routes will fail"
                );
                None
            }
        };

        Self {
            places,
            store,
            search_timeout: Duration::from_secs(cfg.search_timeout_secs),
        }
    }

    pub fn places(&self) -> Result<&dyn NearbySearch, AppError> {
        self.places.as_deref().ok_or_else(|| {
            AppError::Configuration("Missing GOOGLE_MAPS_API_KEY env var on the server".into())
        })
    }

    pub fn store(&self) -> Result<&dyn RowStore, AppError> {
        self.store.as_deref().ok_or_else(|| {
            AppError::Configuration(
                "Missing GOOGLE_SHEET_ID or GOOGLE_SHEETS_ACCESS_TOKEN env var on the server"
                    .into(),
            )
        })
    }
}
