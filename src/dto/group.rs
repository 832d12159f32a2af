use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::validation::{validate_group_code, validate_player_count},
    state::group::GroupCode,
};

/// Smallest roster accepted when registering a group.
pub const MIN_GROUP_PLAYERS: usize = 2;

/// Payload registering a new group with its initial roster.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    /// Five letters or digits; stored uppercase.
    #[serde(default)]
    pub group_code: String,
    /// Initial players, all starting at score 0.
    #[serde(default)]
    pub players: Vec<String>,
}

impl Validate for CreateGroupRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_group_code(&self.group_code) {
            errors.add("groupCode", e);
        }

        if let Err(e) = validate_player_count(&self.players, MIN_GROUP_PLAYERS, None) {
            errors.add("players", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Confirmation returned once a group has been registered.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupResponse {
    /// Always `true`.
    pub success: bool,
    /// Normalized (uppercase) code to share with the group.
    pub group_code: String,
    /// Human readable confirmation.
    pub message: String,
}

impl From<GroupCode> for CreateGroupResponse {
    fn from(code: GroupCode) -> Self {
        Self {
            success: true,
            group_code: code.to_string(),
            message: "Group created successfully".into(),
        }
    }
}

/// Names of the players registered in a group.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayersResponse {
    /// Player names in table order.
    pub players: Vec<String>,
}
