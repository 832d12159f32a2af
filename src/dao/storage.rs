use std::error::Error;
use thiserror::Error;

/// Result alias for Persistence Gateway operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by sheet backends regardless of where the rows live.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or answered with something unusable.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// What the backend was doing.
        message: String,
        /// Underlying backend failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The backend refused the operation outright (missing sheet, duplicate sheet...).
    #[error("storage rejected operation on `{sheet}`: {message}")]
    Rejected {
        /// Sheet the operation targeted.
        sheet: String,
        /// Reason given by the backend.
        message: String,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a rejection for the given sheet.
    pub fn rejected(sheet: impl Into<String>, message: impl Into<String>) -> Self {
        StorageError::Rejected {
            sheet: sheet.into(),
            message: message.into(),
        }
    }
}
