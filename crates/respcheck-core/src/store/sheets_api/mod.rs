//! Google Sheets store (REST API v4).
//!
//! Authenticates with an OAuth bearer access token read from the environment
//! (for example the output of `gcloud auth print-access-token`), or else by
//! signing in with a service-account key file. Cell updates for a sheet go out as one
//! `values:batchUpdate` request.

mod a1;
mod client;
mod service_account;

pub use a1::{cell_range, column_letters, header_range, quote_sheet};
pub use service_account::{ServiceAccountKey, SPREADSHEETS_SCOPE};

use self::client::{ApiClient, Method};
use super::{SheetData, StoreError, TabularStore};
use crate::config::SheetsApiConfig;
use crate::report::CellWrite;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Extracts the spreadsheet id from a bare id or a
/// `https://docs.google.com/spreadsheets/d/<id>/edit` URL.
pub fn parse_spreadsheet_id(input: &str) -> String {
    let input = input.trim();
    match input.split_once("/spreadsheets/d/") {
        Some((_, rest)) => rest
            .split(|c: char| c == '/' || c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .to_string(),
        None => input.to_string(),
    }
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One spreadsheet reached through the Sheets API.
#[derive(Debug, Clone)]
pub struct SheetsApi {
    base: Url,
    spreadsheet_id: String,
    client: ApiClient,
}

impl SheetsApi {
    pub fn new(
        base_url: &str,
        spreadsheet: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            base: Url::parse(base_url)?,
            spreadsheet_id: parse_spreadsheet_id(spreadsheet),
            client: ApiClient::new(token.into(), timeout),
        })
    }

    /// Builds a store from config. The token in `cfg.token_env` wins; without
    /// it the configured service-account key signs in.
    pub fn from_config(cfg: &SheetsApiConfig, spreadsheet: &str) -> Result<Self, StoreError> {
        let timeout = Duration::from_secs(cfg.timeout_secs);
        let env_token = std::env::var(&cfg.token_env)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let token = match (env_token, &cfg.service_account_key) {
            (Some(token), _) => token,
            (None, Some(path)) => ServiceAccountKey::from_file(path)?.access_token(timeout)?,
            (None, None) => return Err(StoreError::MissingToken(cfg.token_env.clone())),
        };
        Self::new(&cfg.base_url, spreadsheet, token, timeout)
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// `{base}/v4/spreadsheets/{id}/{tail...}` with each segment percent-encoded.
    fn endpoint(&self, tail: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str()])
            .extend(tail);
        Ok(url)
    }
}

impl TabularStore for SheetsApi {
    fn list_sheets(&self) -> Result<Vec<String>, StoreError> {
        let mut url = self.endpoint(&[])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");
        let body = self.client.request(Method::Get, url.as_str(), None)?;
        let meta: SpreadsheetMeta = serde_json::from_value(body)?;
        Ok(meta.sheets.into_iter().map(|s| s.properties.title).collect())
    }

    fn read_sheet(&self, sheet: &str) -> Result<SheetData, StoreError> {
        let range = quote_sheet(sheet);
        let url = self.endpoint(&["values", &range])?;
        let body = self.client.request(Method::Get, url.as_str(), None)?;
        let vr: ValueRange = serde_json::from_value(body)?;
        let rows: Vec<Vec<String>> = vr
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        Ok(SheetData::from_rows(sheet, rows))
    }

    fn write_header(&mut self, sheet: &str, header: &[String]) -> Result<(), StoreError> {
        let range = header_range(sheet);
        let mut url = self.endpoint(&["values", &range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = json!({ "range": range, "values": [header] });
        self.client.request(Method::Put, url.as_str(), Some(&body))?;
        Ok(())
    }

    fn write_cells(&mut self, sheet: &str, cells: &[CellWrite]) -> Result<(), StoreError> {
        if cells.is_empty() {
            return Ok(());
        }
        let url = self.endpoint(&["values:batchUpdate"])?;
        let body = batch_update_body(sheet, cells);
        self.client.request(Method::Post, url.as_str(), Some(&body))?;
        tracing::debug!(sheet, cells = cells.len(), "batch update sent");
        Ok(())
    }
}

fn batch_update_body(sheet: &str, cells: &[CellWrite]) -> serde_json::Value {
    let data: Vec<serde_json::Value> = cells
        .iter()
        .map(|c| {
            json!({
                "range": cell_range(sheet, c.row, c.column),
                "values": [[c.value]],
            })
        })
        .collect();
    json!({ "valueInputOption": "RAW", "data": data })
}
