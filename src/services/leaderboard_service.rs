use crate::{
    dto::rankings::RankingsResponse,
    error::ServiceError,
    state::{SharedState, group::GroupCode},
};

/// Leaderboard of a group, highest score first; an empty table yields an empty list.
pub async fn get_rankings(
    state: &SharedState,
    raw_code: &str,
) -> Result<RankingsResponse, ServiceError> {
    let code = GroupCode::parse(raw_code)?;
    let repository = state.groups().await?;
    let Some(table) = repository.load_table(&code).await? else {
        return Err(ServiceError::NotFound(format!("group `{code}` not found")));
    };

    Ok(table.standings(state.config().tie_break).into_iter().collect())
}
