use std::{env, path::PathBuf};

use super::error::{SheetsDaoError, SheetsResult};

const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";
/// OAuth2 endpoint issuing service account tokens.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Where the service account credentials come from.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// JSON key file downloaded from the Google Cloud console.
    KeyFile(PathBuf),
    /// Email and PEM private key passed separately.
    Inline {
        /// Service account email, used as the token issuer.
        client_email: String,
        /// PEM encoded private key.
        private_key: String,
    },
}

/// Runtime configuration describing which spreadsheet to use and how to authenticate.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Root of the Sheets REST API, without trailing slash.
    pub api_base: String,
    /// Spreadsheet holding every group sheet and the audit log.
    pub spreadsheet_id: String,
    /// Service account used to sign token requests.
    pub credentials: CredentialSource,
    /// Token endpoint overriding the one of the service account key.
    pub token_uri: Option<String>,
}

impl SheetsConfig {
    /// Construct a configuration for `spreadsheet_id` against the public API.
    pub fn new(spreadsheet_id: impl Into<String>, credentials: CredentialSource) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            spreadsheet_id: spreadsheet_id.into(),
            credentials,
            token_uri: None,
        }
    }

    /// Point the client at another API root (emulators, proxies).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Request access tokens from another OAuth2 endpoint.
    pub fn with_token_uri(mut self, token_uri: impl Into<String>) -> Self {
        self.token_uri = Some(token_uri.into());
        self
    }

    /// Build a configuration by reading the expected environment variables.
    ///
    /// `GOOGLE_SERVICE_ACCOUNT_KEY` (path to a key file) wins over the
    /// `GOOGLE_SERVICE_ACCOUNT_EMAIL` / `GOOGLE_PRIVATE_KEY` pair.
    pub fn from_env() -> SheetsResult<Self> {
        let spreadsheet_id =
            env::var("GOOGLE_SPREADSHEET_ID").map_err(|_| SheetsDaoError::MissingEnvVar {
                var: "GOOGLE_SPREADSHEET_ID",
            })?;

        let credentials = match env::var_os("GOOGLE_SERVICE_ACCOUNT_KEY") {
            Some(path) if !path.is_empty() => CredentialSource::KeyFile(PathBuf::from(path)),
            _ => {
                let client_email = env::var("GOOGLE_SERVICE_ACCOUNT_EMAIL").map_err(|_| {
                    SheetsDaoError::MissingEnvVar {
                        var: "GOOGLE_SERVICE_ACCOUNT_EMAIL",
                    }
                })?;
                let private_key = env::var("GOOGLE_PRIVATE_KEY").map_err(|_| {
                    SheetsDaoError::MissingEnvVar {
                        var: "GOOGLE_PRIVATE_KEY",
                    }
                })?;
                CredentialSource::Inline {
                    client_email,
                    // Keys pasted into env files usually carry escaped newlines.
                    private_key: private_key.replace("\\n", "\n"),
                }
            }
        };

        let mut config = Self::new(spreadsheet_id, credentials);
        if let Ok(api_base) = env::var("GOOGLE_SHEETS_API_BASE") {
            config = config.with_api_base(api_base);
        }
        if let Ok(token_uri) = env::var("GOOGLE_TOKEN_URI") {
            config = config.with_token_uri(token_uri);
        }
        Ok(config)
    }
}
