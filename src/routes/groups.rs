use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::group::{CreateGroupRequest, CreateGroupResponse, PlayersResponse},
    error::{AppError, ErrorBody},
    routes::json::ApiJson,
    services::group_service,
    state::SharedState,
};

/// Group registration and roster lookup.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/groups", post(create_group))
        .route("/groups/create", post(create_group_legacy))
        .route("/groups/{code}/players", get(get_players))
}

#[utoipa::path(
    post,
    path = "/groups",
    tag = "groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created", body = CreateGroupResponse),
        (status = 400, description = "Invalid code or roster, or code already taken", body = ErrorBody),
        (status = 500, description = "Spreadsheet error", body = ErrorBody),
        (status = 503, description = "Degraded mode", body = ErrorBody)
    )
)]
/// Register a group with its initial players, all at score 0.
pub async fn create_group(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<CreateGroupRequest>,
) -> Result<Json<CreateGroupResponse>, AppError> {
    payload.validate()?;
    let created = group_service::register(&state, payload).await?;
    Ok(Json(created))
}

#[utoipa::path(
    post,
    path = "/groups/create",
    tag = "groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created", body = CreateGroupResponse),
        (status = 400, description = "Invalid code or roster, or code already taken", body = ErrorBody)
    )
)]
/// Same as `POST /groups`, kept for clients using the older path.
pub async fn create_group_legacy(
    state: State<SharedState>,
    payload: ApiJson<CreateGroupRequest>,
) -> Result<Json<CreateGroupResponse>, AppError> {
    create_group(state, payload).await
}

#[utoipa::path(
    get,
    path = "/groups/{code}/players",
    tag = "groups",
    params(("code" = String, Path, description = "Group code")),
    responses(
        (status = 200, description = "Players in table order", body = PlayersResponse),
        (status = 400, description = "Malformed group code", body = ErrorBody),
        (status = 404, description = "Unknown group", body = ErrorBody)
    )
)]
/// List the players registered in a group.
pub async fn get_players(
    State(state): State<SharedState>,
    Path(code): Path<String>,
) -> Result<Json<PlayersResponse>, AppError> {
    let players = group_service::lookup_players(&state, &code).await?;
    Ok(Json(players))
}
