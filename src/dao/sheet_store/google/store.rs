use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::debug;
use yup_oauth2::{AccessToken, ServiceAccountAuthenticator, ServiceAccountKey};

use crate::dao::{models::Row, sheet_store::SheetStore, storage::StorageResult};

use super::{
    config::{CredentialSource, DEFAULT_TOKEN_URI, SheetsConfig},
    error::{SheetsDaoError, SheetsResult},
    models::{
        BatchUpdateRequest, SHEETS_SCOPE, SpreadsheetMetadata, ValueRange, WriteValueRange,
        data_range, full_range, header_range,
    },
};

/// Sheets REST v4 client bound to a single spreadsheet.
#[derive(Clone)]
pub struct GoogleSheetStore {
    client: Client,
    api_base: Arc<str>,
    spreadsheet_id: Arc<str>,
    key: Arc<ServiceAccountKey>,
    token: Arc<Mutex<Option<AccessToken>>>,
}

impl GoogleSheetStore {
    /// Load credentials and make sure the spreadsheet is reachable.
    pub async fn connect(config: SheetsConfig) -> SheetsResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| SheetsDaoError::ClientBuilder { source })?;

        let key = load_key(config.credentials, config.token_uri).await?;

        let store = Self {
            client,
            api_base: Arc::<str>::from(config.api_base.trim_end_matches('/')),
            spreadsheet_id: Arc::<str>::from(config.spreadsheet_id),
            key: Arc::new(key),
            token: Arc::new(Mutex::new(None)),
        };

        store.fetch_metadata("spreadsheetId").await?;
        Ok(store)
    }

    /// Return a valid bearer token, asking Google for a fresh one when the cached one expired.
    async fn access_token(&self) -> SheetsResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|token| !token.is_expired()) {
            if let Some(value) = token.token() {
                return Ok(value.to_owned());
            }
        }

        let auth = ServiceAccountAuthenticator::builder((*self.key).clone())
            .build()
            .await
            .map_err(|source| SheetsDaoError::Authenticator { source })?;
        let token = auth
            .token(&[SHEETS_SCOPE])
            .await
            .map_err(|source| SheetsDaoError::Token { source })?;
        let value = token
            .token()
            .filter(|value| !value.is_empty())
            .ok_or(SheetsDaoError::EmptyToken)?
            .to_owned();

        *cached = Some(token);
        Ok(value)
    }

    async fn request(&self, method: Method, path: &str) -> SheetsResult<RequestBuilder> {
        let token = self.access_token().await?;
        let url = format!("{}/spreadsheets/{}{}", self.api_base, self.spreadsheet_id, path);
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn dispatch(&self, builder: RequestBuilder, path: &str) -> SheetsResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|source| SheetsDaoError::RequestSend {
                path: path.to_owned(),
                source,
            })?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(SheetsDaoError::RequestStatus {
                path: path.to_owned(),
                status: response.status(),
            })
        }
    }

    async fn decode<T>(response: Response, path: &str) -> SheetsResult<T>
    where
        T: DeserializeOwned,
    {
        response
            .json::<T>()
            .await
            .map_err(|source| SheetsDaoError::DecodeResponse {
                path: path.to_owned(),
                source,
            })
    }

    async fn fetch_metadata(&self, fields: &str) -> SheetsResult<SpreadsheetMetadata> {
        let builder = self.request(Method::GET, "").await?.query(&[("fields", fields)]);
        let response = self.dispatch(builder, "metadata").await?;
        Self::decode(response, "metadata").await
    }

    async fn sheet_titles(&self) -> SheetsResult<Vec<String>> {
        let metadata = self.fetch_metadata("sheets.properties.title").await?;
        Ok(metadata
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.title)
            .collect())
    }

    async fn put_values(&self, range: &str, values: Vec<Row>) -> SheetsResult<()> {
        let path = format!("/values/{range}");
        let builder = self
            .request(Method::PUT, &path)
            .await?
            .query(&[("valueInputOption", "RAW")])
            .json(&WriteValueRange::rows(range, values));
        self.dispatch(builder, &path).await.map(drop)
    }

    async fn read_values(&self, sheet: &str) -> SheetsResult<Option<Vec<Row>>> {
        let range = full_range(sheet);
        let path = format!("/values/{range}");
        let builder = self.request(Method::GET, &path).await?.query(&[
            ("valueRenderOption", "FORMATTED_VALUE"),
            ("majorDimension", "ROWS"),
        ]);

        match self.dispatch(builder, &path).await {
            Ok(response) => {
                let ValueRange { values } = Self::decode(response, &path).await?;
                Ok(Some(values))
            }
            // Ranges on unknown sheets are rejected as unparseable.
            Err(SheetsDaoError::RequestStatus { path, status })
                if status == StatusCode::BAD_REQUEST =>
            {
                if self.sheet_titles().await?.iter().any(|title| title == sheet) {
                    Err(SheetsDaoError::RequestStatus { path, status })
                } else {
                    Ok(None)
                }
            }
            Err(err) => Err(err),
        }
    }

    async fn add_sheet(&self, title: String, header: Row) -> SheetsResult<()> {
        const BATCH_UPDATE: &str = ":batchUpdate";
        let range = header_range(&title);
        let builder = self
            .request(Method::POST, BATCH_UPDATE)
            .await?
            .json(&BatchUpdateRequest::add_sheet(title));
        self.dispatch(builder, BATCH_UPDATE).await?;
        self.put_values(&range, vec![header]).await
    }

    async fn clear_values(&self, sheet: &str) -> SheetsResult<()> {
        let path = format!("/values/{}:clear", data_range(sheet));
        let builder = self
            .request(Method::POST, &path)
            .await?
            .json(&serde_json::json!({}));
        self.dispatch(builder, &path).await.map(drop)
    }

    async fn append_values(&self, sheet: &str, row: Row) -> SheetsResult<()> {
        let range = full_range(sheet);
        let path = format!("/values/{range}:append");
        let builder = self
            .request(Method::POST, &path)
            .await?
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&WriteValueRange::rows(&range, vec![row]));
        self.dispatch(builder, &path).await.map(drop)
    }
}

async fn load_key(
    credentials: CredentialSource,
    token_uri: Option<String>,
) -> SheetsResult<ServiceAccountKey> {
    let mut key: ServiceAccountKey = match credentials {
        CredentialSource::KeyFile(path) => yup_oauth2::read_service_account_key(&path)
            .await
            .map_err(|source| SheetsDaoError::ReadKey { path, source })?,
        CredentialSource::Inline {
            client_email,
            private_key,
        } => serde_json::from_value(serde_json::json!({
            "type": "service_account",
            "client_email": client_email,
            "private_key": private_key,
            "token_uri": DEFAULT_TOKEN_URI,
        }))
        .map_err(|source| SheetsDaoError::InvalidKey { source })?,
    };

    if let Some(token_uri) = token_uri {
        key.token_uri = token_uri;
    }
    Ok(key)
}

impl SheetStore for GoogleSheetStore {
    fn list_sheets(&self) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let store = self.clone();
        Box::pin(async move { store.sheet_titles().await.map_err(Into::into) })
    }

    fn create_sheet(&self, name: String, header: Row) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            debug!(sheet = %name, "adding sheet");
            store.add_sheet(name, header).await.map_err(Into::into)
        })
    }

    fn read_rows(&self, name: String) -> BoxFuture<'static, StorageResult<Option<Vec<Row>>>> {
        let store = self.clone();
        Box::pin(async move { store.read_values(&name).await.map_err(Into::into) })
    }

    fn write_rows(&self, name: String, rows: Vec<Row>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            if rows.is_empty() {
                return Ok(());
            }
            let range = data_range(&name);
            store.put_values(&range, rows).await.map_err(Into::into)
        })
    }

    fn clear_rows(&self, name: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.clear_values(&name).await.map_err(Into::into) })
    }

    fn append_row(&self, name: String, row: Row) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.append_values(&name, row).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .fetch_metadata("spreadsheetId")
                .await
                .map(drop)
                .map_err(Into::into)
        })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.token.lock().await.take();
            store.access_token().await?;
            store
                .fetch_metadata("spreadsheetId")
                .await
                .map(drop)
                .map_err(Into::into)
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        extract::Path,
        http::StatusCode as HttpStatus,
        response::{IntoResponse, Response},
        routing::{get, post},
    };
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;
    use crate::dao::storage::StorageError;

    const TEST_KEY: &str = include_str!("testdata/service_account.pem");

    /// Local stand-in for the OAuth2 and Sheets endpoints.
    ///
    /// `Group_ABCDE` and `Locked` exist; `Locked` rejects reads with 400 and
    /// `Flaky` answers 500.
    fn fake_google() -> Router {
        Router::new()
            .route(
                "/token",
                post(|| async {
                    Json(json!({
                        "access_token": "test-token",
                        "token_type": "Bearer",
                        "expires_in": 3600
                    }))
                }),
            )
            .route(
                "/spreadsheets/{id}",
                get(|| async {
                    Json(json!({
                        "spreadsheetId": "sheet-id",
                        "sheets": [
                            { "properties": { "title": "Group_ABCDE" } },
                            { "properties": { "title": "Locked" } }
                        ]
                    }))
                }),
            )
            .route(
                "/spreadsheets/{id}/values/{range}",
                get(|Path((_, range)): Path<(String, String)>| async move {
                    let sheet = range.split('!').next().unwrap_or_default().to_owned();
                    let response: Response = match sheet.as_str() {
                        "Group_ABCDE" => Json(json!({
                            "range": range,
                            "values": [["Player", "Score"], ["Alice", "2"]]
                        }))
                        .into_response(),
                        "Flaky" => HttpStatus::INTERNAL_SERVER_ERROR.into_response(),
                        _ => HttpStatus::BAD_REQUEST.into_response(),
                    };
                    response
                }),
            )
    }

    async fn connect() -> GoogleSheetStore {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move { axum::serve(listener, fake_google()).await });

        let credentials = CredentialSource::Inline {
            client_email: "ladder@test.iam.gserviceaccount.com".into(),
            private_key: TEST_KEY.into(),
        };
        let config = SheetsConfig::new("sheet-id", credentials)
            .with_api_base(base.clone())
            .with_token_uri(format!("{base}/token"));
        GoogleSheetStore::connect(config).await.unwrap()
    }

    #[tokio::test]
    async fn reads_rows_of_existing_sheet() {
        let store = connect().await;
        let rows = store.read_rows("Group_ABCDE".into()).await.unwrap().unwrap();
        assert_eq!(rows[1], vec!["Alice".to_string(), "2".to_string()]);
    }

    #[tokio::test]
    async fn missing_sheet_reads_as_none() {
        let store = connect().await;
        assert!(store.read_rows("Group_ZZZZZ".into()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn bad_request_on_existing_sheet_is_an_error() {
        let store = connect().await;
        assert!(matches!(
            store.read_rows("Locked".into()).await,
            Err(StorageError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn server_errors_surface_as_unavailable() {
        let store = connect().await;
        assert!(matches!(
            store.read_rows("Flaky".into()).await,
            Err(StorageError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn lists_sheet_titles() {
        let store = connect().await;
        assert_eq!(
            store.list_sheets().await.unwrap(),
            vec!["Group_ABCDE".to_string(), "Locked".to_string()]
        );
    }
}
