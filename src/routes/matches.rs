use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::{common::SuccessResponse, matches::RecordMatchRequest},
    error::{AppError, ErrorBody},
    routes::json::ApiJson,
    services::match_service,
    state::SharedState,
};

/// Match submission.
pub fn router() -> Router<SharedState> {
    Router::new().route("/match", post(record_match))
}

#[utoipa::path(
    post,
    path = "/match",
    tag = "matches",
    request_body = RecordMatchRequest,
    responses(
        (status = 200, description = "Match recorded", body = SuccessResponse),
        (status = 400, description = "Invalid roster or group code", body = ErrorBody),
        (status = 404, description = "Unknown group", body = ErrorBody),
        (status = 500, description = "Spreadsheet error", body = ErrorBody),
        (status = 503, description = "Degraded mode", body = ErrorBody)
    )
)]
/// Record a match; the first player listed is the winner.
pub async fn record_match(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<RecordMatchRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    payload.validate()?;
    let recorded = match_service::record_match(&state, payload).await?;
    Ok(Json(recorded))
}
