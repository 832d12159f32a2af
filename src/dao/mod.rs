/// Group sheets: player tables and the match audit log.
pub mod group;
/// Row-level persistence models.
pub mod models;
/// Spreadsheet backends acting as the Persistence Gateway.
pub mod sheet_store;
/// Storage abstraction layer errors.
pub mod storage;
