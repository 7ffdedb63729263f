use chrono::{SecondsFormat, Utc};

use crate::errors::AppError;
use crate::models::Hint;
use crate::store::{Row, RowStore, StoreError};

pub(crate) const HINTS_RANGE: &str = "Hints";
pub(crate) const HINTS_HEADER: [&str; 2] = ["hint", "timestamp"];

pub(crate) struct HintsRepository;

impl HintsRepository {
    pub async fn list(store: &dyn RowStore) -> Result<Vec<Hint>, AppError> {
        let err = |e| AppError::store("hints read", e);
        if Self::ensure_tab(store).await.map_err(err)? {
            return Ok(Vec::new());
        }

        let rows = store.read_rows(HINTS_RANGE).await.map_err(err)?;
        Ok(rows
            .into_iter()
            .skip(1)
            .map(|mut row| {
                row.resize(2, String::new());
                let timestamp = row.pop().unwrap_or_default();
                let text = row.pop().unwrap_or_default();
                Hint { text, timestamp }
            })
            .collect())
    }

    /// Append a hint stamped with the current time.
    pub async fn add(store: &dyn RowStore, text: &str) -> Result<Hint, AppError> {
        let err = |e| AppError::store("hints write", e);
        Self::ensure_tab(store).await.map_err(err)?;

        let hint = Hint {
            text: text.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        store
            .append_row(HINTS_RANGE, vec![hint.text.clone(), hint.timestamp.clone()])
            .await
            .map_err(err)?;

        Ok(hint)
    }

    pub async fn reset(store: &dyn RowStore) -> Result<(), AppError> {
        let err = |e| AppError::store("hints reset", e);
        Self::ensure_tab_exists(store).await.map_err(err)?;
        store.clear(HINTS_RANGE).await.map_err(err)?;
        Self::write_header(store).await.map_err(err)
    }

    /// Create the tab with its header if missing. Returns `true` when created.
    async fn ensure_tab(store: &dyn RowStore) -> Result<bool, StoreError> {
        let created = Self::ensure_tab_exists(store).await?;
        if created {
            Self::write_header(store).await?;
        }
        Ok(created)
    }

    async fn ensure_tab_exists(store: &dyn RowStore) -> Result<bool, StoreError> {
        store.ensure_tab(HINTS_RANGE).await
    }

    async fn write_header(store: &dyn RowStore) -> Result<(), StoreError> {
        let header: Row = HINTS_HEADER.iter().map(|s| s.to_string()).collect();
        store
            .write_rows(&format!("{HINTS_RANGE}!A1"), vec![header])
            .await
    }
}
