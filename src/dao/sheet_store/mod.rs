/// Google Sheets REST backend.
#[cfg(feature = "sheets-store")]
pub mod google;
/// In-process backend.
pub mod memory;

use crate::dao::models::Row;
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;

/// Row-oriented spreadsheet used as the application's database.
///
/// Every sheet has a header on row 1; the data area starts on row 2.
pub trait SheetStore: Send + Sync {
    /// Titles of every sheet in the spreadsheet.
    fn list_sheets(&self) -> BoxFuture<'static, StorageResult<Vec<String>>>;
    /// Add a sheet named `name` and write `header` on its first row.
    fn create_sheet(&self, name: String, header: Row) -> BoxFuture<'static, StorageResult<()>>;
    /// All rows of the sheet, header included, or `None` when it does not exist.
    fn read_rows(&self, name: String) -> BoxFuture<'static, StorageResult<Option<Vec<Row>>>>;
    /// Overwrite the data area with `rows`.
    fn write_rows(&self, name: String, rows: Vec<Row>) -> BoxFuture<'static, StorageResult<()>>;
    /// Clear the data area, keeping the header.
    fn clear_rows(&self, name: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Append `row` after the last non-empty row.
    fn append_row(&self, name: String, row: Row) -> BoxFuture<'static, StorageResult<()>>;
    /// Cheap reachability probe.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Re-establish credentials or connections after a failed probe.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
