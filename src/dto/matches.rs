use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    dto::validation::{validate_group_code, validate_player_count},
    state::group::{MAX_MATCH_PLAYERS, MIN_MATCH_PLAYERS},
};

/// Outcome of one match. The first player listed won.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordMatchRequest {
    /// Two to four distinct names, winner first.
    #[serde(default)]
    pub players: Vec<String>,
    /// Group the match belongs to.
    #[serde(default)]
    pub group_code: String,
}

impl Validate for RecordMatchRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_group_code(&self.group_code) {
            errors.add("groupCode", e);
        }

        if let Err(e) =
            validate_player_count(&self.players, MIN_MATCH_PLAYERS, Some(MAX_MATCH_PLAYERS))
        {
            errors.add("players", e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> RecordMatchRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accepts_two_to_four_players() {
        assert!(
            request(r#"{"groupCode":"ABCDE","players":["A","B"]}"#)
                .validate()
                .is_ok()
        );
        assert!(
            request(r#"{"groupCode":"ABCDE","players":["A","B","C","D"]}"#)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn rejects_rosters_outside_bounds() {
        assert!(
            request(r#"{"groupCode":"ABCDE","players":["A"]}"#)
                .validate()
                .is_err()
        );
        assert!(
            request(r#"{"groupCode":"ABCDE","players":["A","B","C","D","E"]}"#)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn rejects_missing_group_code() {
        let errors = request(r#"{"players":["A","B"]}"#).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("groupCode"));
    }
}
