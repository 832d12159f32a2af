use axum::Router;

use crate::state::SharedState;

/// `/auth/verify`.
pub mod auth;
/// Swagger UI.
pub mod docs;
/// `/groups` endpoints.
pub mod groups;
/// `/healthcheck`.
pub mod health;
/// JSON extractor with API-shaped rejections.
pub mod json;
/// `/match`.
pub mod matches;
/// `/rankings`.
pub mod rankings;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(groups::router())
        .merge(matches::router())
        .merge(rankings::router())
        .merge(auth::router());

    api_router.merge(docs::router()).with_state(state)
}
