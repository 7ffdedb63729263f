//! In-process row store for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Row, RowStore, StoreError};

/// Tabs of string cells, addressed with the same A1 ranges as a spreadsheet.
/// Writing to a tab that does not exist fails, as it does upstream.
#[derive(Default)]
pub(crate) struct MemoryRowStore {
    tabs: Mutex<HashMap<String, Vec<Row>>>,
}

/// Parsed `Tab!C1:C2` range; columns are 0-based, rows 1-based.
struct A1 {
    tab: String,
    first_col: usize,
    last_col: Option<usize>,
    first_row: usize,
    last_row: Option<usize>,
}

fn parse_cell(cell: &str) -> (usize, Option<usize>) {
    let split = cell.find(|c: char| c.is_ascii_digit()).unwrap_or(cell.len());
    let (letters, digits) = cell.split_at(split);
    let col = letters
        .bytes()
        .fold(0usize, |acc, b| acc * 26 + usize::from(b.to_ascii_uppercase() - b'A') + 1)
        - 1;
    (col, digits.parse().ok())
}

fn parse_range(range: &str) -> A1 {
    let Some((tab, cells)) = range.split_once('!') else {
        return A1 {
            tab: range.to_string(),
            first_col: 0,
            last_col: None,
            first_row: 1,
            last_row: None,
        };
    };

    let (start, end) = match cells.split_once(':') {
        Some((start, end)) => (parse_cell(start), Some(parse_cell(end))),
        None => (parse_cell(cells), None),
    };
    let (first_col, first_row) = start;
    let (last_col, last_row) = match end {
        Some((col, row)) => (Some(col), row),
        // a lone cell with a row number addresses exactly that cell
        None => (Some(first_col), first_row),
    };

    A1 {
        tab: tab.to_string(),
        first_col,
        last_col,
        first_row: first_row.unwrap_or(1),
        last_row,
    }
}

fn missing_tab(tab: &str) -> StoreError {
    StoreError::Status {
        status: 400,
        body: format!("Unable to parse range: {tab}"),
    }
}

impl MemoryRowStore {
    pub fn with_tabs(titles: &[&str]) -> Self {
        let store = Self::default();
        {
            let mut tabs = store.tabs.lock().unwrap();
            for title in titles {
                tabs.insert(title.to_string(), Vec::new());
            }
        }
        store
    }

    /// Snapshot of a tab's rows with trailing blanks removed.
    pub fn rows(&self, tab: &str) -> Option<Vec<Row>> {
        let tabs = self.tabs.lock().unwrap();
        tabs.get(tab).map(|rows| trimmed(rows.clone()))
    }
}

fn trimmed(mut rows: Vec<Row>) -> Vec<Row> {
    for row in &mut rows {
        while row.last().is_some_and(String::is_empty) {
            row.pop();
        }
    }
    while rows.last().is_some_and(Vec::is_empty) {
        rows.pop();
    }
    rows
}

#[async_trait]
impl RowStore for MemoryRowStore {
    async fn read_rows(&self, range: &str) -> Result<Vec<Row>, StoreError> {
        let a1 = parse_range(range);
        let tabs = self.tabs.lock().unwrap();
        let grid = tabs.get(&a1.tab).ok_or_else(|| missing_tab(&a1.tab))?;

        let last_row = a1.last_row.unwrap_or(grid.len()).min(grid.len());
        let rows = (a1.first_row..=last_row)
            .map(|r| {
                let row = &grid[r - 1];
                let last_col = a1.last_col.unwrap_or(usize::MAX).min(row.len().saturating_sub(1));
                if row.is_empty() || a1.first_col > last_col {
                    Vec::new()
                } else {
                    row[a1.first_col..=last_col].to_vec()
                }
            })
            .collect();
        Ok(trimmed(rows))
    }

    async fn clear(&self, range: &str) -> Result<(), StoreError> {
        let a1 = parse_range(range);
        let mut tabs = self.tabs.lock().unwrap();
        let grid = tabs.get_mut(&a1.tab).ok_or_else(|| missing_tab(&a1.tab))?;

        let last_row = a1.last_row.unwrap_or(grid.len()).min(grid.len());
        for r in a1.first_row..=last_row {
            let row = &mut grid[r - 1];
            let last_col = a1.last_col.unwrap_or(usize::MAX);
            for (c, cell) in row.iter_mut().enumerate() {
                if c >= a1.first_col && c <= last_col {
                    cell.clear();
                }
            }
        }
        Ok(())
    }

    async fn write_rows(&self, range: &str, rows: Vec<Row>) -> Result<(), StoreError> {
        let a1 = parse_range(range);
        let mut tabs = self.tabs.lock().unwrap();
        let grid = tabs.get_mut(&a1.tab).ok_or_else(|| missing_tab(&a1.tab))?;

        for (i, values) in rows.into_iter().enumerate() {
            let r = a1.first_row - 1 + i;
            if grid.len() <= r {
                grid.resize(r + 1, Vec::new());
            }
            let row = &mut grid[r];
            for (j, value) in values.into_iter().enumerate() {
                let c = a1.first_col + j;
                if row.len() <= c {
                    row.resize(c + 1, String::new());
                }
                row[c] = value;
            }
        }
        Ok(())
    }

    async fn append_row(&self, range: &str, row: Row) -> Result<(), StoreError> {
        let a1 = parse_range(range);
        let mut tabs = self.tabs.lock().unwrap();
        let grid = tabs.get_mut(&a1.tab).ok_or_else(|| missing_tab(&a1.tab))?;

        let used = trimmed(grid.clone()).len();
        grid.truncate(used);
        grid.push(row);
        Ok(())
    }

    async fn ensure_tab(&self, title: &str) -> Result<bool, StoreError> {
        let mut tabs = self.tabs.lock().unwrap();
        if tabs.contains_key(title) {
            return Ok(false);
        }
        tabs.insert(title.to_string(), Vec::new());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_a1_ranges() {
        let a1 = parse_range("Sheet1!K2:K9");
        assert_eq!(a1.tab, "Sheet1");
        assert_eq!((a1.first_col, a1.last_col), (10, Some(10)));
        assert_eq!((a1.first_row, a1.last_row), (2, Some(9)));

        let a1 = parse_range("Sheet1!A:A");
        assert_eq!((a1.first_col, a1.last_col), (0, Some(0)));
        assert_eq!((a1.first_row, a1.last_row), (1, None));

        let a1 = parse_range("Hints");
        assert_eq!(a1.tab, "Hints");
        assert_eq!(a1.last_col, None);

        assert_eq!(parse_cell("AA10"), (26, Some(10)));
    }

    #[actix_web::test]
    async fn writes_and_reads_sub_ranges() {
        let store = MemoryRowStore::with_tabs(&["Sheet1"]);
        store
            .write_rows("Sheet1!A1", vec![row(&["id", "x"]), row(&["a", "1"]), row(&["b", "2"])])
            .await
            .unwrap();
        store.write_rows("Sheet1!B3", vec![row(&["9"])]).await.unwrap();

        assert_eq!(
            store.read_rows("Sheet1!A:A").await.unwrap(),
            vec![row(&["id"]), row(&["a"]), row(&["b"])]
        );
        assert_eq!(
            store.read_rows("Sheet1").await.unwrap(),
            vec![row(&["id", "x"]), row(&["a", "1"]), row(&["b", "9"])]
        );
    }

    #[actix_web::test]
    async fn missing_tab_is_an_error() {
        let store = MemoryRowStore::default();
        assert!(store.read_rows("Hints").await.is_err());
        assert!(store.ensure_tab("Hints").await.unwrap());
        assert!(!store.ensure_tab("Hints").await.unwrap());
        assert!(store.read_rows("Hints").await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn append_goes_after_last_used_row() {
        let store = MemoryRowStore::with_tabs(&["Hints"]);
        store.write_rows("Hints!A1", vec![row(&["hint", "timestamp"])]).await.unwrap();
        store.append_row("Hints", row(&["one", "t1"])).await.unwrap();
        store.clear("Hints").await.unwrap();
        store.append_row("Hints", row(&["two", "t2"])).await.unwrap();

        assert_eq!(store.rows("Hints").unwrap(), vec![row(&["two", "t2"])]);
    }
}
