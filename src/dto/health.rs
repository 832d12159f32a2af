use serde::Serialize;
use utoipa::ToSchema;

/// Body of `GET /healthcheck`.
#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` while a sheet store is installed, `degraded` otherwise.
    pub status: &'static str,
}

impl HealthResponse {
    /// A sheet store is installed.
    pub fn ok() -> Self {
        Self { status: "ok" }
    }

    /// No sheet store is installed.
    pub fn degraded() -> Self {
        Self { status: "degraded" }
    }
}
