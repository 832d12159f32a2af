use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// One spreadsheet row, cells rendered as strings.
pub type Row = Vec<String>;

/// Header written on row 1 of every group sheet.
pub const PLAYER_TABLE_HEADER: [&str; 2] = ["Player", "Score"];
/// Header written on row 1 of the match audit sheet.
pub const AUDIT_HEADER: [&str; 5] = ["Timestamp", "Group", "Winner", "Losers...", "Players"];

/// Build a header row from static labels.
pub fn header_row(labels: &[&str]) -> Row {
    labels.iter().map(|label| (*label).to_owned()).collect()
}

/// Persisted representation of a player line inside a group sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRowEntity {
    /// Display name, unique within the group.
    pub name: String,
    /// Raw score cell, `None` when the cell is absent.
    pub score: Option<String>,
}

impl PlayerRowEntity {
    /// Read a data row; rows without a name are not player lines.
    pub fn from_row(row: &[String]) -> Option<Self> {
        let name = row.first()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_owned(),
            score: row.get(1).cloned(),
        })
    }

    /// Parsed score, `None` when the cell is missing or not a non-negative integer.
    pub fn parsed_score(&self) -> Option<u32> {
        self.score.as_deref()?.trim().parse().ok()
    }

    /// Row written back to the sheet for `name` at `score`.
    pub fn to_row(name: &str, score: u32) -> Row {
        vec![name.to_owned(), score.to_string()]
    }
}

/// Immutable record appended for every recorded match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchAuditEntity {
    /// When the match was submitted.
    pub recorded_at: OffsetDateTime,
    /// Normalized group code.
    pub group: String,
    /// First participant submitted.
    pub winner: String,
    /// Other participants in submission order.
    pub losers: Vec<String>,
}

impl MatchAuditEntity {
    /// Number of participants, winner included.
    pub fn player_count(&self) -> usize {
        self.losers.len() + 1
    }

    /// `[timestamp, group, winner, losers..., player count]`.
    pub fn to_row(&self) -> Row {
        let timestamp = self
            .recorded_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| "invalid-timestamp".into());

        let mut row = Vec::with_capacity(self.losers.len() + 4);
        row.push(timestamp);
        row.push(self.group.clone());
        row.push(self.winner.clone());
        row.extend(self.losers.iter().cloned());
        row.push(self.player_count().to_string());
        row
    }
}
