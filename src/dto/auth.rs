use serde::Deserialize;
use utoipa::ToSchema;

/// Code typed on the login screen.
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyCodeRequest {
    /// Raw code, checked against the group code format.
    #[serde(default)]
    pub code: String,
}
