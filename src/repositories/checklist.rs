use std::collections::HashMap;

use crate::classify::Category;
use crate::errors::AppError;
use crate::models::{ChecklistBar, ChecklistBarInput, CheckStatus};
use crate::store::{Row, RowStore};

pub(crate) const SHEET_RANGE: &str = "Sheet1";
const PLACE_ID_COLUMN: &str = "A";
const CHECK_STATUS_COLUMN: &str = "K";

/// Column layout of the checklist tab, A through L.
pub(crate) const HEADER_ROW: [&str; 12] = [
    "placeId",
    "name",
    "address",
    "lat",
    "lng",
    "rating",
    "ratingsTotal",
    "priceLevel",
    "businessStatus",
    "mapsUrl",
    "checkStatus",
    "category",
];

pub(crate) struct ChecklistRepository;

impl ChecklistRepository {
    pub async fn list(store: &dyn RowStore) -> Result<Vec<ChecklistBar>, AppError> {
        let rows = store
            .read_rows(SHEET_RANGE)
            .await
            .map_err(|e| AppError::store("read", e))?;

        let Some((header, data)) = rows.split_first() else {
            return Ok(Vec::new());
        };
        let columns: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        Ok(data
            .iter()
            .map(|row| Self::build_checklist_bar(&columns, row))
            .collect())
    }

    /// Clear the tab and write the header plus one row per bar.
    pub async fn replace(
        store: &dyn RowStore,
        bars: &[ChecklistBarInput],
    ) -> Result<usize, AppError> {
        let mut rows: Vec<Row> = Vec::with_capacity(bars.len() + 1);
        rows.push(HEADER_ROW.iter().map(|s| s.to_string()).collect());
        rows.extend(bars.iter().map(Self::to_row));

        store
            .clear(SHEET_RANGE)
            .await
            .map_err(|e| AppError::store("write", e))?;
        store
            .write_rows(&format!("{SHEET_RANGE}!A1"), rows)
            .await
            .map_err(|e| AppError::store("write", e))?;

        Ok(bars.len())
    }

    pub async fn set_status(
        store: &dyn RowStore,
        place_id: &str,
        status: CheckStatus,
    ) -> Result<(), AppError> {
        let column = format!("{SHEET_RANGE}!{PLACE_ID_COLUMN}:{PLACE_ID_COLUMN}");
        let row = store
            .find_row_by_key(&column, place_id)
            .await
            .map_err(|e| AppError::store("status update", e))?
            .ok_or_else(|| AppError::NotFound(format!("Bar not found: {place_id}")))?;

        store
            .write_rows(
                &format!("{SHEET_RANGE}!{CHECK_STATUS_COLUMN}{row}"),
                vec![vec![status.as_str().to_string()]],
            )
            .await
            .map_err(|e| AppError::store("status update", e))
    }

    /// Set every data row back to unchecked. Returns `None` when the tab has
    /// no data rows.
    pub async fn reset(store: &dyn RowStore) -> Result<Option<usize>, AppError> {
        let rows = store
            .read_rows(SHEET_RANGE)
            .await
            .map_err(|e| AppError::store("reset", e))?;
        if rows.len() <= 1 {
            return Ok(None);
        }

        let count = rows.len() - 1;
        let values = vec![vec![CheckStatus::Unchecked.as_str().to_string()]; count];
        store
            .write_rows(
                &format!(
                    "{SHEET_RANGE}!{CHECK_STATUS_COLUMN}2:{CHECK_STATUS_COLUMN}{}",
                    rows.len()
                ),
                values,
            )
            .await
            .map_err(|e| AppError::store("reset", e))?;

        Ok(Some(count))
    }

    fn to_row(bar: &ChecklistBarInput) -> Row {
        fn opt<T: ToString>(v: Option<T>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }

        vec![
            bar.place_id.clone().unwrap_or_default(),
            bar.name.clone().unwrap_or_default(),
            bar.address.clone().unwrap_or_default(),
            opt(bar.lat),
            opt(bar.lng),
            opt(bar.rating),
            opt(bar.ratings_total),
            opt(bar.price_level),
            bar.status.clone().unwrap_or_default(),
            bar.maps_url.clone().unwrap_or_default(),
            bar.check_status
                .clone()
                .unwrap_or_else(|| CheckStatus::default().as_str().to_string()),
            bar.category
                .clone()
                .unwrap_or_else(|| Category::default().as_str().to_string()),
        ]
    }

    fn cell<'a>(columns: &HashMap<&str, usize>, row: &'a [String], name: &str) -> &'a str {
        columns
            .get(name)
            .and_then(|&i| row.get(i))
            .map_or("", String::as_str)
    }

    fn build_checklist_bar(columns: &HashMap<&str, usize>, row: &[String]) -> ChecklistBar {
        let text = |name| Self::cell(columns, row, name).to_string();
        let non_empty = |name| Some(Self::cell(columns, row, name)).filter(|s| !s.is_empty());

        ChecklistBar {
            place_id: text("placeId"),
            name: text("name"),
            address: text("address"),
            lat: non_empty("lat").and_then(|s| s.parse().ok()),
            lng: non_empty("lng").and_then(|s| s.parse().ok()),
            rating: non_empty("rating").and_then(|s| s.parse().ok()),
            ratings_total: non_empty("ratingsTotal").and_then(|s| s.parse().ok()),
            price_level: non_empty("priceLevel").and_then(|s| s.parse().ok()),
            status: non_empty("businessStatus").map(str::to_string),
            maps_url: text("mapsUrl"),
            check_status: non_empty("checkStatus")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            category: non_empty("category")
                .and_then(|s| s.parse::<Category>().ok())
                .unwrap_or_default(),
        }
    }
}
