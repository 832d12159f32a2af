//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::state::group::GroupCode;

/// Validates that a group code is present and made of exactly 5 ASCII letters or digits.
///
/// # Examples
///
/// ```ignore
/// validate_group_code("ab12Z") // Ok
/// validate_group_code("")      // Err - missing
/// validate_group_code("AB-12") // Err - punctuation
/// ```
pub fn validate_group_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        let mut err = ValidationError::new("group_code_required");
        err.message = Some("Group code is required".into());
        return Err(err);
    }

    if let Err(invalid) = GroupCode::parse(code) {
        let mut err = ValidationError::new("group_code_format");
        err.message = Some(invalid.to_string().into());
        return Err(err);
    }

    Ok(())
}

/// Validates that `players` holds between `min` and `max` entries (inclusive).
pub fn validate_player_count(
    players: &[String],
    min: usize,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    let count = players.len();
    let too_many = max.is_some_and(|max| count > max);
    if count < min || too_many {
        let mut err = ValidationError::new("player_count");
        err.message = Some(match max {
            Some(max) => format!("Between {min} and {max} players are required (got {count})"),
            None => format!("At least {min} players are required (got {count})"),
        }
        .into());
        err.add_param("count".into(), &count);
        return Err(err);
    }

    Ok(())
}
