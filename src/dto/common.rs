use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement returned by write endpoints without a payload.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct SuccessResponse {
    /// Always `true`; failures use the error body.
    pub success: bool,
}

impl SuccessResponse {
    /// Successful acknowledgement.
    pub fn ok() -> Self {
        Self { success: true }
    }
}
