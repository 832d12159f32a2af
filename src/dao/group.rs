use std::sync::Arc;

use tracing::warn;

use crate::{
    dao::{
        models::{
            AUDIT_HEADER, MatchAuditEntity, PLAYER_TABLE_HEADER, PlayerRowEntity, Row, header_row,
        },
        sheet_store::SheetStore,
        storage::{StorageError, StorageResult},
    },
    state::group::{GroupCode, PlayerTable},
};

/// Data Access Object mapping groups onto `Group_<CODE>` sheets.
#[derive(Clone)]
pub struct GroupRepository {
    store: Arc<dyn SheetStore>,
}

impl GroupRepository {
    /// Repository backed by `store`.
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// Whether a sheet exists for `code`.
    pub async fn exists(&self, code: &GroupCode) -> StorageResult<bool> {
        let sheet = code.sheet_name();
        let titles = self.store.list_sheets().await?;
        Ok(titles.iter().any(|title| *title == sheet))
    }

    /// Create the group's sheet with its header and initial players.
    pub async fn create(&self, code: &GroupCode, table: &PlayerTable) -> StorageResult<()> {
        let sheet = code.sheet_name();
        self.store
            .create_sheet(sheet.clone(), header_row(&PLAYER_TABLE_HEADER))
            .await?;
        self.store.write_rows(sheet, table_rows(table)).await
    }

    /// Read the group's player table, `None` when the group has no sheet.
    pub async fn load_table(&self, code: &GroupCode) -> StorageResult<Option<PlayerTable>> {
        let Some(rows) = self.store.read_rows(code.sheet_name()).await? else {
            return Ok(None);
        };

        let mut table = PlayerTable::new();
        for entity in rows.iter().skip(1).filter_map(|row| PlayerRowEntity::from_row(row)) {
            let score = entity.parsed_score().unwrap_or_else(|| {
                warn!(
                    group = %code,
                    player = %entity.name,
                    cell = ?entity.score,
                    "unreadable score cell; counting it as 0"
                );
                0
            });
            if table.contains(&entity.name) {
                warn!(group = %code, player = %entity.name, "duplicate player row ignored");
                continue;
            }
            table.set(entity.name, score);
        }
        Ok(Some(table))
    }

    /// Replace the group's rows with `table`, in table order.
    ///
    /// Clear and write are two calls: a failure in between leaves the sheet empty.
    pub async fn save_table(&self, code: &GroupCode, table: &PlayerTable) -> StorageResult<()> {
        let sheet = code.sheet_name();
        self.store.clear_rows(sheet.clone()).await?;
        self.store.write_rows(sheet, table_rows(table)).await
    }

    /// Append `entry` to the audit sheet, creating the sheet on first use.
    pub async fn append_audit(&self, sheet: &str, entry: &MatchAuditEntity) -> StorageResult<()> {
        let titles = self.store.list_sheets().await?;
        if !titles.iter().any(|title| title == sheet) {
            match self
                .store
                .create_sheet(sheet.to_owned(), header_row(&AUDIT_HEADER))
                .await
            {
                // Another writer created it first.
                Ok(()) | Err(StorageError::Rejected { .. }) => {}
                Err(err) => return Err(err),
            }
        }
        self.store.append_row(sheet.to_owned(), entry.to_row()).await
    }
}

fn table_rows(table: &PlayerTable) -> Vec<Row> {
    table
        .iter()
        .map(|(name, score)| PlayerRowEntity::to_row(name, score))
        .collect()
}
