//! In-memory store, used by tests and by callers that assemble sheets themselves.

use super::{SheetData, StoreError, TabularStore, Workbook, WorkbookSheet};
use crate::report::CellWrite;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    book: Workbook,
    fail_writes: bool,
    batch_writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sheet given as raw rows (first row is the header).
    pub fn insert_sheet(&mut self, name: impl Into<String>, rows: Vec<Vec<String>>) {
        self.book.sheets.push(WorkbookSheet {
            name: name.into(),
            rows,
        });
    }

    /// Makes every `write_cells` call fail, to exercise unsaved results.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of `write_cells` calls accepted so far.
    pub fn batch_writes(&self) -> usize {
        self.batch_writes
    }
}

impl TabularStore for MemoryStore {
    fn list_sheets(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.book.names())
    }

    fn read_sheet(&self, sheet: &str) -> Result<SheetData, StoreError> {
        self.book.sheet_data(sheet)
    }

    fn write_header(&mut self, sheet: &str, header: &[String]) -> Result<(), StoreError> {
        self.book.set_header(sheet, header)
    }

    fn write_cells(&mut self, sheet: &str, cells: &[CellWrite]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Api {
                status: 503,
                message: "write rejected".to_string(),
            });
        }
        self.book.apply(sheet, cells)?;
        self.batch_writes += 1;
        Ok(())
    }
}
