//! Tabular stores: where sheets are read from and status cells written to.
//!
//! The pipeline only talks to [`TabularStore`]. Three stores are provided:
//! an in-memory one, a JSON workbook file, and Google Sheets over its REST API.

mod error;
mod memory;
pub mod sheets_api;
mod workbook;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sheets_api::{ServiceAccountKey, SheetsApi};
pub use workbook::{Workbook, WorkbookFile, WorkbookSheet};

use crate::report::CellWrite;

/// One sheet as read from a store: header row plus body rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetData {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetData {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Splits raw rows into header (first row) and body.
    pub fn from_rows(name: impl Into<String>, mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return Self::empty(name);
        }
        let header = rows.remove(0);
        Self {
            name: name.into(),
            header,
            rows,
        }
    }

    /// No header and no rows.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

/// Boundary to the spreadsheet backend.
pub trait TabularStore {
    /// Sheet names in workbook order.
    fn list_sheets(&self) -> Result<Vec<String>, StoreError>;

    fn read_sheet(&self, sheet: &str) -> Result<SheetData, StoreError>;

    /// Replaces row 1 of `sheet` with `header`.
    fn write_header(&mut self, sheet: &str, header: &[String]) -> Result<(), StoreError>;

    /// Writes all `cells` in a single request.
    fn write_cells(&mut self, sheet: &str, cells: &[CellWrite]) -> Result<(), StoreError>;

    /// 1-based position of `column` in `header`; appends it (and persists the
    /// header) when absent.
    fn ensure_column(
        &mut self,
        sheet: &str,
        header: &mut Vec<String>,
        column: &str,
    ) -> Result<usize, StoreError> {
        if let Some(i) = header.iter().position(|h| h == column) {
            return Ok(i + 1);
        }
        header.push(column.to_string());
        self.write_header(sheet, header)?;
        tracing::info!(sheet, column, position = header.len(), "added status column");
        Ok(header.len())
    }
}

/// Applies `cells` to raw rows (header at index 0), growing rows and columns
/// as needed.
pub(crate) fn apply_cells(rows: &mut Vec<Vec<String>>, cells: &[CellWrite]) {
    for cell in cells {
        if cell.row == 0 || cell.column == 0 {
            continue;
        }
        let (r, c) = (cell.row - 1, cell.column - 1);
        if rows.len() <= r {
            rows.resize_with(r + 1, Vec::new);
        }
        let row = &mut rows[r];
        if row.len() <= c {
            row.resize(c + 1, String::new());
        }
        row[c] = cell.value.clone();
    }
}

/// Replaces (or creates) the header row.
pub(crate) fn set_header(rows: &mut Vec<Vec<String>>, header: &[String]) {
    if rows.is_empty() {
        rows.push(header.to_vec());
    } else {
        rows[0] = header.to_vec();
    }
}
