use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::state::group::Standing;

/// Query string of the leaderboard endpoint.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RankingsQuery {
    /// Group whose leaderboard is requested.
    pub group_code: Option<String>,
}

/// One leaderboard line.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct RankingEntry {
    /// Player name.
    pub name: String,
    /// Matches won.
    pub score: u32,
}

impl From<Standing> for RankingEntry {
    fn from(standing: Standing) -> Self {
        Self {
            name: standing.name,
            score: standing.score,
        }
    }
}

/// Leaderboard sorted by score, highest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct RankingsResponse {
    /// Highest score first.
    pub rankings: Vec<RankingEntry>,
}

impl FromIterator<Standing> for RankingsResponse {
    fn from_iter<T: IntoIterator<Item = Standing>>(iter: T) -> Self {
        Self {
            rankings: iter.into_iter().map(Into::into).collect(),
        }
    }
}
