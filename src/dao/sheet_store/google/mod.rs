mod config;
mod error;
mod models;
mod store;

pub use config::{CredentialSource, SheetsConfig};
pub use error::{SheetsDaoError, SheetsResult};
pub use store::GoogleSheetStore;

use crate::dao::storage::StorageError;

impl From<SheetsDaoError> for StorageError {
    fn from(err: SheetsDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
