//! JSON workbook file store.
//!
//! Layout: `{ "sheets": [ { "name": "Links", "rows": [["Source"], ["a.com"]] } ] }`.
//! The first row of a sheet is its header. Each mutation rewrites the file
//! through a temp file in the same directory.

use super::{apply_cells, set_header, SheetData, StoreError, TabularStore};
use crate::report::CellWrite;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookSheet {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Ordered sheets with raw rows (header included).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub sheets: Vec<WorkbookSheet>,
}

impl Workbook {
    pub fn names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Result<&WorkbookSheet, StoreError> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| StoreError::SheetNotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut WorkbookSheet, StoreError> {
        self.sheets
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| StoreError::SheetNotFound(name.to_string()))
    }

    pub fn sheet_data(&self, name: &str) -> Result<SheetData, StoreError> {
        let sheet = self.get(name)?;
        Ok(SheetData::from_rows(sheet.name.clone(), sheet.rows.clone()))
    }

    pub fn set_header(&mut self, name: &str, header: &[String]) -> Result<(), StoreError> {
        set_header(&mut self.get_mut(name)?.rows, header);
        Ok(())
    }

    pub fn apply(&mut self, name: &str, cells: &[CellWrite]) -> Result<(), StoreError> {
        apply_cells(&mut self.get_mut(name)?.rows, cells);
        Ok(())
    }
}

/// Workbook persisted as a JSON file.
#[derive(Debug)]
pub struct WorkbookFile {
    path: PathBuf,
    book: Workbook,
}

impl WorkbookFile {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = fs::read_to_string(&path)?;
        let book: Workbook = serde_json::from_str(&data)?;
        tracing::debug!(path = %path.display(), sheets = book.sheets.len(), "opened workbook");
        Ok(Self { path, book })
    }

    /// Writes `book` to `path` and opens it.
    pub fn create(path: impl Into<PathBuf>, book: Workbook) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            book,
        };
        store.save()?;
        Ok(store)
    }

    fn save(&self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, &self.book)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl TabularStore for WorkbookFile {
    fn list_sheets(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.book.names())
    }

    fn read_sheet(&self, sheet: &str) -> Result<SheetData, StoreError> {
        self.book.sheet_data(sheet)
    }

    fn write_header(&mut self, sheet: &str, header: &[String]) -> Result<(), StoreError> {
        self.book.set_header(sheet, header)?;
        self.save()
    }

    fn write_cells(&mut self, sheet: &str, cells: &[CellWrite]) -> Result<(), StoreError> {
        self.book.apply(sheet, cells)?;
        self.save()
    }
}
