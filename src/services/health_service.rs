use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness; the storage probe only feeds the logs and the degraded flag.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.require_sheet_store().await {
        Ok(store) => {
            if let Err(err) = store.health_check().await {
                warn!(error = %err, "sheet store health check failed");
            }
        }
        Err(_) => warn!("sheet store unavailable (degraded mode)"),
    }

    if state.is_degraded().await {
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
    }
}
