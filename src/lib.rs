//! Library crate for match-ladder-back, exposing modules for binaries and integration tests.

/// Application configuration loaded at startup.
pub mod config;
/// Spreadsheet persistence: gateway trait, backends and group repository.
pub mod dao;
/// JSON bodies exchanged over HTTP.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// axum routers.
pub mod routes;
/// Group, match and leaderboard operations.
pub mod services;
/// Shared runtime state and domain types.
pub mod state;
