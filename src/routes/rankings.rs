use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::rankings::{RankingsQuery, RankingsResponse},
    error::{AppError, ErrorBody},
    services::leaderboard_service,
    state::SharedState,
};

/// Leaderboards.
pub fn router() -> Router<SharedState> {
    Router::new().route("/rankings", get(get_rankings))
}

#[utoipa::path(
    get,
    path = "/rankings",
    tag = "rankings",
    params(RankingsQuery),
    responses(
        (status = 200, description = "Leaderboard, highest score first", body = RankingsResponse),
        (status = 400, description = "Missing or malformed group code", body = ErrorBody),
        (status = 404, description = "Unknown group", body = ErrorBody)
    )
)]
/// Return a group's leaderboard.
pub async fn get_rankings(
    State(state): State<SharedState>,
    Query(query): Query<RankingsQuery>,
) -> Result<Json<RankingsResponse>, AppError> {
    let code = query
        .group_code
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Group code is required".into()))?;
    let rankings = leaderboard_service::get_rankings(&state, code.trim()).await?;
    Ok(Json(rankings))
}
