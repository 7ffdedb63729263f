//! Tabular row store addressed by A1 ranges (`Tab`, `Tab!A1`, `Tab!K2:K9`).

#[cfg(test)]
pub(crate) mod memory;
mod sheets;

use async_trait::async_trait;
use thiserror::Error;

pub(crate) use sheets::SheetsStore;

pub type Row = Vec<String>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid base URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[async_trait]
pub(crate) trait RowStore: Send + Sync {
    /// All rows in `range`; an empty tab yields no rows.
    async fn read_rows(&self, range: &str) -> Result<Vec<Row>, StoreError>;

    async fn clear(&self, range: &str) -> Result<(), StoreError>;

    /// Overwrite cells starting at the top-left of `range`.
    async fn write_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), StoreError>;

    /// Add `row` after the last non-empty row of the table in `range`.
    async fn append_row(&self, range: &str, row: Row) -> Result<(), StoreError>;

    /// Create the tab if missing. Returns `true` when it was created.
    async fn ensure_tab(&self, title: &str) -> Result<bool, StoreError>;

    /// 1-based row number of the first data row whose first cell in
    /// `column_range` equals `key`. Row 1 is the header and never matches.
    async fn find_row_by_key(
        &self,
        column_range: &str,
        key: &str,
    ) -> Result<Option<usize>, StoreError> {
        let rows = self.read_rows(column_range).await?;
        Ok(rows
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.first().is_some_and(|cell| cell == key))
            .map(|(i, _)| i + 1))
    }
}
