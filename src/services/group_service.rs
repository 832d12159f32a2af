use std::collections::HashSet;

use tracing::info;

use crate::{
    dto::{
        common::SuccessResponse,
        group::{CreateGroupRequest, CreateGroupResponse, MIN_GROUP_PLAYERS, PlayersResponse},
    },
    error::ServiceError,
    state::{
        SharedState,
        group::{GroupCode, PlayerTable},
    },
};

/// Register a group and persist its roster with every player at 0.
///
/// The code and the roster are validated before any storage call is made.
pub async fn register(
    state: &SharedState,
    request: CreateGroupRequest,
) -> Result<CreateGroupResponse, ServiceError> {
    let CreateGroupRequest {
        group_code,
        players,
    } = request;

    let code = GroupCode::parse(&group_code)?;
    let roster = build_roster(players)?;

    let repository = state.groups().await?;
    let _registry = state.registry_lock().lock().await;

    if repository.exists(&code).await? {
        return Err(ServiceError::Conflict(format!(
            "group code `{code}` already exists"
        )));
    }

    // Held until the roster is written so a match cannot land on a header-only sheet.
    let lock = state.group_lock(&code);
    let _guard = lock.lock().await;
    repository
        .create(&code, &PlayerTable::with_players(roster.iter().cloned()))
        .await?;

    info!(group = %code, players = roster.len(), "created group");
    Ok(code.into())
}

/// Whether `raw_code` names a registered group.
pub async fn exists(state: &SharedState, raw_code: &str) -> Result<bool, ServiceError> {
    let code = GroupCode::parse(raw_code)?;
    let repository = state.groups().await?;
    Ok(repository.exists(&code).await?)
}

/// Login-style check: succeed only when the code is well formed and registered.
pub async fn verify_code(
    state: &SharedState,
    raw_code: &str,
) -> Result<SuccessResponse, ServiceError> {
    if exists(state, raw_code).await? {
        Ok(SuccessResponse::ok())
    } else {
        Err(ServiceError::NotFound("invalid group code".into()))
    }
}

/// Names of the group's players in table order.
pub async fn lookup_players(
    state: &SharedState,
    raw_code: &str,
) -> Result<PlayersResponse, ServiceError> {
    let code = GroupCode::parse(raw_code)?;
    let repository = state.groups().await?;
    let Some(table) = repository.load_table(&code).await? else {
        return Err(ServiceError::NotFound(format!("group `{code}` not found")));
    };

    Ok(PlayersResponse {
        players: table.names().map(str::to_owned).collect(),
    })
}

fn build_roster(players: Vec<String>) -> Result<Vec<String>, ServiceError> {
    if players.len() < MIN_GROUP_PLAYERS {
        return Err(ServiceError::InvalidInput(format!(
            "a group requires at least {MIN_GROUP_PLAYERS} players"
        )));
    }

    let mut seen = HashSet::new();
    players
        .into_iter()
        .map(|player| {
            let name = player.trim().to_owned();
            if name.is_empty() {
                return Err(ServiceError::InvalidInput(
                    "player name must not be empty".into(),
                ));
            }
            if !seen.insert(name.clone()) {
                return Err(ServiceError::InvalidInput(format!(
                    "duplicate player name `{name}` detected"
                )));
            }
            Ok(name)
        })
        .collect()
}
