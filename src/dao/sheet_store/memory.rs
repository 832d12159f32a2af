//! Process-local spreadsheet used when no remote spreadsheet is configured.

use std::{
    io,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use dashmap::{DashMap, mapref::entry::Entry};
use futures::future::BoxFuture;

use crate::dao::{
    models::Row,
    sheet_store::SheetStore,
    storage::{StorageError, StorageResult},
};

/// Sheets held in memory; contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemorySheetStore {
    sheets: Arc<DashMap<String, Vec<Row>>>,
    unavailable: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MemorySheetStore {
    /// Empty store, reachable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail as if the backend were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of gateway operations issued so far, probes included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of the raw rows of `name`, header included.
    pub fn snapshot(&self, name: &str) -> Option<Vec<Row>> {
        self.sheets.get(name).map(|rows| rows.value().clone())
    }

    fn enter(&self, operation: &str) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable(
                format!("memory store offline during {operation}"),
                io::Error::new(io::ErrorKind::NotConnected, "memory store offline"),
            ));
        }
        Ok(())
    }

    fn with_sheet<T>(
        &self,
        name: &str,
        operation: &str,
        apply: impl FnOnce(&mut Vec<Row>) -> T,
    ) -> StorageResult<T> {
        self.enter(operation)?;
        let mut rows = self
            .sheets
            .get_mut(name)
            .ok_or_else(|| StorageError::rejected(name, "sheet does not exist"))?;
        Ok(apply(rows.value_mut()))
    }
}

impl SheetStore for MemorySheetStore {
    fn list_sheets(&self) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let store = self.clone();
        Box::pin(async move {
            store.enter("list_sheets")?;
            let mut titles = store
                .sheets
                .iter()
                .map(|entry| entry.key().clone())
                .collect::<Vec<_>>();
            titles.sort();
            Ok(titles)
        })
    }

    fn create_sheet(&self, name: String, header: Row) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.enter("create_sheet")?;
            match store.sheets.entry(name) {
                Entry::Occupied(entry) => Err(StorageError::rejected(
                    entry.key().clone(),
                    "sheet already exists",
                )),
                Entry::Vacant(entry) => {
                    entry.insert(vec![header]);
                    Ok(())
                }
            }
        })
    }

    fn read_rows(&self, name: String) -> BoxFuture<'static, StorageResult<Option<Vec<Row>>>> {
        let store = self.clone();
        Box::pin(async move {
            store.enter("read_rows")?;
            Ok(store.snapshot(&name))
        })
    }

    fn write_rows(&self, name: String, rows: Vec<Row>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.with_sheet(&name, "write_rows", |sheet| {
                for (offset, row) in rows.into_iter().enumerate() {
                    let index = offset + 1;
                    if index < sheet.len() {
                        sheet[index] = row;
                    } else {
                        sheet.push(row);
                    }
                }
            })
        })
    }

    fn clear_rows(&self, name: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.with_sheet(&name, "clear_rows", |sheet| sheet.truncate(1)) })
    }

    fn append_row(&self, name: String, row: Row) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.with_sheet(&name, "append_row", |sheet| sheet.push(row)) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.enter("health_check") })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.enter("try_reconnect") })
    }
}
