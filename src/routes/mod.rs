use axum::Router;

use crate::state::SharedState;

/// Swagger UI and OpenAPI document.
pub mod docs;
/// Health check route.
pub mod health;
/// Weekly summary-order routes.
pub mod order;
/// Roster routes.
pub mod roster;
/// Weekly selection routes.
pub mod selection;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(roster::router())
        .merge(selection::router())
        .merge(order::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
