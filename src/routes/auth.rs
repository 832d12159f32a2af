use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::{auth::VerifyCodeRequest, common::SuccessResponse},
    error::{AppError, ErrorBody},
    routes::json::ApiJson,
    services::group_service,
    state::SharedState,
};

/// Group code verification.
pub fn router() -> Router<SharedState> {
    Router::new().route("/auth/verify", post(verify_code))
}

#[utoipa::path(
    post,
    path = "/auth/verify",
    tag = "auth",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Code belongs to a group", body = SuccessResponse),
        (status = 400, description = "Malformed code", body = ErrorBody),
        (status = 404, description = "No group uses this code", body = ErrorBody)
    )
)]
/// Check a code typed on the login screen.
pub async fn verify_code(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<VerifyCodeRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let verified = group_service::verify_code(&state, payload.code.trim()).await?;
    Ok(Json(verified))
}
