/// Code verification bodies.
pub mod auth;
/// Bodies shared by several endpoints.
pub mod common;
/// Group registration and roster bodies.
pub mod group;
/// Health check body.
pub mod health;
/// Match submission body.
pub mod matches;
/// Leaderboard query and body.
pub mod rankings;
/// Field validators used by the request bodies.
pub mod validation;
