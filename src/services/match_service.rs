use time::OffsetDateTime;
use tracing::{info, warn};

use crate::{
    dao::models::MatchAuditEntity,
    dto::{common::SuccessResponse, matches::RecordMatchRequest},
    error::ServiceError,
    services::ranking::apply_result,
    state::{
        SharedState,
        group::{GroupCode, MatchResult},
    },
};

/// Record a match for a group: audit it, fold it into the table and persist the sorted table.
///
/// Updates of the same group are serialized through the group's lock; the audit row is not
/// rolled back when the table write fails afterwards.
pub async fn record_match(
    state: &SharedState,
    request: RecordMatchRequest,
) -> Result<SuccessResponse, ServiceError> {
    let code = GroupCode::parse(&request.group_code)?;
    let result = MatchResult::new(&request.players)?;

    let repository = state.groups().await?;
    // Only registered groups get a lock entry.
    if !repository.exists(&code).await? {
        return Err(ServiceError::NotFound(format!("group `{code}` not found")));
    }
    let lock = state.group_lock(&code);
    let _guard = lock.lock().await;

    let Some(table) = repository.load_table(&code).await? else {
        return Err(ServiceError::NotFound(format!("group `{code}` not found")));
    };

    let audit = &state.config().audit;
    if audit.enabled {
        let entry = MatchAuditEntity {
            recorded_at: OffsetDateTime::now_utc(),
            group: code.to_string(),
            winner: result.winner().to_owned(),
            losers: result.others().to_vec(),
        };
        repository.append_audit(&audit.sheet, &entry).await?;
    }

    let updated = apply_result(&table, &result, state.config().tie_break);
    if let Err(err) = repository.save_table(&code, &updated).await {
        if audit.enabled {
            warn!(group = %code, "match audited but rankings were not saved");
        }
        return Err(err.into());
    }

    info!(
        group = %code,
        winner = %result.winner(),
        players = result.players().len(),
        "recorded match"
    );
    Ok(SuccessResponse::ok())
}
