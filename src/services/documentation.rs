use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Match Ladder Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::groups::create_group,
        crate::routes::groups::create_group_legacy,
        crate::routes::groups::get_players,
        crate::routes::matches::record_match,
        crate::routes::rankings::get_rankings,
        crate::routes::auth::verify_code,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::SuccessResponse,
            crate::dto::group::CreateGroupRequest,
            crate::dto::group::CreateGroupResponse,
            crate::dto::group::PlayersResponse,
            crate::dto::matches::RecordMatchRequest,
            crate::dto::rankings::RankingEntry,
            crate::dto::rankings::RankingsResponse,
            crate::dto::auth::VerifyCodeRequest,
            crate::error::ErrorBody,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "groups", description = "Group registration and rosters"),
        (name = "matches", description = "Match submission"),
        (name = "rankings", description = "Group leaderboards"),
        (name = "auth", description = "Group code verification"),
    )
)]
pub struct ApiDoc;
