use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dao::models::Row;

/// Scope requested for every access token.
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
/// Last column read or written; the application never uses more.
const LAST_COLUMN: &str = "Z";

/// Every cell of `sheet`.
pub fn full_range(sheet: &str) -> String {
    format!("{sheet}!A:{LAST_COLUMN}")
}

/// Every cell of `sheet` below the header row.
pub fn data_range(sheet: &str) -> String {
    format!("{sheet}!A2:{LAST_COLUMN}")
}

/// Header row of `sheet`.
pub fn header_range(sheet: &str) -> String {
    format!("{sheet}!A1:{LAST_COLUMN}1")
}

#[derive(Debug, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Row>,
}

#[derive(Debug, Serialize)]
pub struct WriteValueRange<'a> {
    pub range: &'a str,
    #[serde(rename = "majorDimension")]
    pub major_dimension: &'static str,
    pub values: Vec<Vec<Value>>,
}

impl<'a> WriteValueRange<'a> {
    pub fn rows(range: &'a str, values: Vec<Row>) -> Self {
        Self {
            range,
            major_dimension: "ROWS",
            values: values
                .into_iter()
                .map(|row| row.into_iter().map(typed_cell).collect())
                .collect(),
        }
    }
}

/// Integers are sent as numbers so the sheet can sum and sort them; the rest stays text.
fn typed_cell(cell: String) -> Value {
    match cell.parse::<u64>() {
        Ok(number) => Value::from(number),
        Err(_) => Value::String(cell),
    }
}

#[derive(Debug, Deserialize)]
pub struct SpreadsheetMetadata {
    #[serde(default)]
    pub sheets: Vec<SheetMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct SheetMetadata {
    pub properties: SheetProperties,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SheetProperties {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct BatchUpdateRequest {
    pub requests: Vec<BatchRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchRequest {
    AddSheet { properties: SheetProperties },
}

impl BatchUpdateRequest {
    pub fn add_sheet(title: String) -> Self {
        Self {
            requests: vec![BatchRequest::AddSheet {
                properties: SheetProperties { title },
            }],
        }
    }
}
