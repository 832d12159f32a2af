//! Error types shared by the Google Sheets storage implementation.

use std::{io, path::PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`SheetsDaoError`] failures.
pub type SheetsResult<T> = Result<T, SheetsDaoError>;

/// Failures that can occur while talking to the Sheets API.
#[derive(Debug, Error)]
pub enum SheetsDaoError {
    /// Required environment variable is missing.
    #[error("missing Google Sheets environment variable `{var}`")]
    MissingEnvVar {
        /// Variable name.
        var: &'static str,
    },
    /// The service account key file could not be read.
    #[error("failed to read service account key `{}`", path.display())]
    ReadKey {
        /// Key file location.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Inline credentials did not form a valid service account key.
    #[error("invalid inline service account credentials")]
    InvalidKey {
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
    /// The OAuth authenticator could not be built.
    #[error("failed to build service account authenticator")]
    Authenticator {
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Google refused to issue an access token.
    #[error("failed to obtain an access token")]
    Token {
        /// Underlying failure.
        #[source]
        source: yup_oauth2::Error,
    },
    /// Google issued a token without a value.
    #[error("access token is empty")]
    EmptyToken,
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build Sheets HTTP client")]
    ClientBuilder {
        /// Underlying failure.
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent.
    #[error("failed to send Sheets request for `{path}`")]
    RequestSend {
        /// API path relative to the spreadsheet.
        path: String,
        /// Underlying failure.
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with an unexpected status code.
    #[error("unexpected Sheets response status {status} for `{path}`")]
    RequestStatus {
        /// API path relative to the spreadsheet.
        path: String,
        /// Status returned by the API.
        status: StatusCode,
    },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode Sheets response for `{path}`")]
    DecodeResponse {
        /// API path relative to the spreadsheet.
        path: String,
        /// Underlying failure.
        #[source]
        source: reqwest::Error,
    },
}
