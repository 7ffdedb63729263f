use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{Row, RowStore, StoreError};

/// Google Sheets v4 values API over a single spreadsheet.
///
/// Authenticates with a pre-issued OAuth bearer token.
pub(crate) struct SheetsStore {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    access_token: String,
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Vec<Value>>>,
}

#[derive(Serialize)]
struct ValuesBody<'a> {
    values: &'a [Row],
}

#[derive(Debug, Default, Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: Option<SheetProperties>,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: Option<String>,
}

impl SheetsStore {
    pub fn new(
        base_url: &str,
        spreadsheet_id: String,
        access_token: String,
        timeout_secs: u64,
    ) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url).map_err(|e| StoreError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".into(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            base_url,
            spreadsheet_id,
            access_token,
        })
    }

    /// `{base}/v4/spreadsheets/{id}/{segments...}` with each segment encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| StoreError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "not a hierarchical URL".into(),
            })?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn values_url(&self, range: &str, suffix: &str) -> Result<Url, StoreError> {
        self.url(&["values", &format!("{range}{suffix}")])
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let resp = request.bearer_auth(&self.access_token).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RowStore for SheetsStore {
    async fn read_rows(&self, range: &str) -> Result<Vec<Row>, StoreError> {
        let url = self.values_url(range, "")?;
        let data: ValueRange = self.send(self.client.get(url)).await?.json().await?;
        Ok(data
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn clear(&self, range: &str) -> Result<(), StoreError> {
        let url = self.values_url(range, ":clear")?;
        self.send(self.client.post(url).json(&json!({}))).await?;
        Ok(())
    }

    async fn write_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), StoreError> {
        let url = self.values_url(range, "")?;
        let request = self
            .client
            .put(url)
            .query(&[("valueInputOption", "RAW")])
            .json(&ValuesBody { values: &rows });
        self.send(request).await?;
        Ok(())
    }

    async fn append_row(&self, range: &str, row: Row) -> Result<(), StoreError> {
        let url = self.values_url(range, ":append")?;
        let request = self
            .client
            .post(url)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&ValuesBody { values: &[row] });
        self.send(request).await?;
        Ok(())
    }

    async fn ensure_tab(&self, title: &str) -> Result<bool, StoreError> {
        let url = self.url(&[])?;
        let request = self
            .client
            .get(url)
            .query(&[("fields", "sheets.properties.title")]);
        let spreadsheet: Spreadsheet = self.send(request).await?.json().await?;

        let exists = spreadsheet
            .sheets
            .iter()
            .filter_map(|s| s.properties.as_ref()?.title.as_deref())
            .any(|t| t == title);
        if exists {
            return Ok(false);
        }

        let mut url = self.url(&[])?;
        let batch_path = format!("{}:batchUpdate", url.path());
        url.set_path(&batch_path);
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }]
        });
        self.send(self.client.post(url).json(&body)).await?;
        log::info!("Created spreadsheet tab {title}");
        Ok(true)
    }
}
