/// OpenAPI documentation generation.
pub mod documentation;
/// Group registration, code verification and roster lookup.
pub mod group_service;
/// Health check service.
pub mod health_service;
/// Read-only leaderboard queries.
pub mod leaderboard_service;
/// Match submission workflow.
pub mod match_service;
/// Pure ranking update applied to a group's table.
pub mod ranking;
/// Storage connection supervisor with reconnect backoff.
pub mod storage_supervisor;
