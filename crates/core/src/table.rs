use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<RowRecord>,
}

impl Sheet {
    pub fn from_grid(grid: Vec<Vec<String>>) -> Self {
        let mut grid = grid.into_iter();
        let headers = grid.next().unwrap_or_default();
        let rows = grid.map(|cells| RowRecord::new(&headers, cells)).collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    cells: IndexMap<String, String>,
}

impl RowRecord {
    fn new(headers: &[String], mut cells: Vec<String>) -> Self {
        // rows come back ragged; pad to the header width, drop the surplus
        if cells.len() < headers.len() {
            cells.resize(headers.len(), String::new());
        }
        let cells = headers.iter().cloned().zip(cells).collect();
        Self { cells }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.get(header).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(header, cell)| (header.as_str(), cell.as_str()))
    }
}
