use std::{cmp::Ordering, collections::HashSet, fmt, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// Number of characters in a group code.
pub const GROUP_CODE_LENGTH: usize = 5;
/// Prefix of the sheet holding a group's player table.
pub const GROUP_SHEET_PREFIX: &str = "Group_";
/// Smallest number of participants in a recorded match.
pub const MIN_MATCH_PLAYERS: usize = 2;
/// Largest number of participants in a recorded match.
pub const MAX_MATCH_PLAYERS: usize = 4;

/// Rejection raised when a raw string is not a valid group code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "group code must be exactly {len} characters (letters or numbers), got `{0}`",
    len = GROUP_CODE_LENGTH
)]
pub struct InvalidGroupCode(pub String);

/// Identifier of a group, normalized to uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupCode(String);

impl GroupCode {
    /// Validate `raw` against `^[A-Za-z0-9]{5}$` and normalize it to uppercase.
    pub fn parse(raw: &str) -> Result<Self, InvalidGroupCode> {
        if raw.len() != GROUP_CODE_LENGTH || !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(InvalidGroupCode(raw.to_owned()));
        }
        Ok(Self(raw.to_ascii_uppercase()))
    }

    /// Normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the sheet storing this group's player table.
    pub fn sheet_name(&self) -> String {
        format!("{GROUP_SHEET_PREFIX}{}", self.0)
    }
}

impl FromStr for GroupCode {
    type Err = InvalidGroupCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GroupCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordering applied between players holding the same score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Case-insensitive name order, falling back to byte order.
    #[default]
    Alphabetical,
    /// Keep the order in which players appear in the table.
    Insertion,
}

impl TieBreak {
    fn compare(self, left: &str, right: &str) -> Ordering {
        match self {
            TieBreak::Alphabetical => left
                .to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| left.cmp(right)),
            TieBreak::Insertion => Ordering::Equal,
        }
    }
}

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// Player name.
    pub name: String,
    /// Matches won.
    pub score: u32,
}

/// Scores of every player known to a group, keyed by name in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerTable {
    scores: IndexMap<String, u32>,
}

impl PlayerTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table listing `players` at score 0, keeping the first occurrence of repeated names.
    pub fn with_players<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for player in players {
            table.ensure(player.into());
        }
        table
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no player is registered.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Score of `name`, if listed.
    pub fn score(&self, name: &str) -> Option<u32> {
        self.scores.get(name).copied()
    }

    /// Whether `name` is listed.
    pub fn contains(&self, name: &str) -> bool {
        self.scores.contains_key(name)
    }

    /// Player names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }

    /// `(name, score)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// Insert `name` at score 0 unless it is already present.
    pub fn ensure(&mut self, name: String) {
        self.scores.entry(name).or_insert(0);
    }

    /// Overwrite the score of `name`, appending it when absent.
    pub fn set(&mut self, name: String, score: u32) {
        self.scores.insert(name, score);
    }

    /// Add one point to `name`, creating the entry at 0 first when needed.
    pub fn increment(&mut self, name: &str) {
        let score = self.scores.entry(name.to_owned()).or_insert(0);
        *score = score.saturating_add(1);
    }

    /// Copy of the table reordered by score descending, ties resolved with `tie_break`.
    pub fn sorted(&self, tie_break: TieBreak) -> Self {
        let mut entries = self
            .scores
            .iter()
            .map(|(name, score)| (name.clone(), *score))
            .collect::<Vec<_>>();
        // `sort_by` is stable, which the insertion policy relies on.
        entries.sort_by(|(left_name, left_score), (right_name, right_score)| {
            right_score
                .cmp(left_score)
                .then_with(|| tie_break.compare(left_name, right_name))
        });
        entries.into_iter().collect()
    }

    /// Leaderboard lines sorted by score descending.
    pub fn standings(&self, tie_break: TieBreak) -> Vec<Standing> {
        self.sorted(tie_break)
            .scores
            .into_iter()
            .map(|(name, score)| Standing { name, score })
            .collect()
    }
}

impl FromIterator<(String, u32)> for PlayerTable {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// Reasons a submitted list of participants cannot be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchResultError {
    #[error(
        "a match requires between {min} and {max} players (got {0})",
        min = MIN_MATCH_PLAYERS,
        max = MAX_MATCH_PLAYERS
    )]
    /// Fewer than two or more than four names.
    PlayerCount(usize),
    /// A name is blank once trimmed.
    #[error("all player names must be filled in")]
    EmptyName,
    /// A name appears twice once trimmed.
    #[error("all player names must be unique (`{0}` appears more than once)")]
    DuplicateName(String),
}

/// Validated participants of one match; the first one won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    players: Vec<String>,
}

impl MatchResult {
    /// Trim every name and check the participant count, blanks and duplicates.
    pub fn new<I, S>(players: I) -> Result<Self, MatchResultError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let players = players
            .into_iter()
            .map(|name| name.as_ref().trim().to_owned())
            .collect::<Vec<_>>();

        if !(MIN_MATCH_PLAYERS..=MAX_MATCH_PLAYERS).contains(&players.len()) {
            return Err(MatchResultError::PlayerCount(players.len()));
        }

        let mut seen = HashSet::new();
        for name in &players {
            if name.is_empty() {
                return Err(MatchResultError::EmptyName);
            }
            if !seen.insert(name.as_str()) {
                return Err(MatchResultError::DuplicateName(name.clone()));
            }
        }

        Ok(Self { players })
    }

    /// First participant.
    pub fn winner(&self) -> &str {
        &self.players[0]
    }

    /// Every participant except the winner, in submission order.
    pub fn others(&self) -> &[String] {
        &self.players[1..]
    }

    /// Every participant, winner first.
    pub fn players(&self) -> &[String] {
        &self.players
    }
}
