use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::roster::RosterResponse, error::AppError, services::roster_service, state::SharedState,
};

/// Read-only roster endpoints.
pub fn router() -> Router<SharedState> {
    Router::new().route("/roster", get(get_roster))
}

#[utoipa::path(
    get,
    path = "/roster",
    tag = "roster",
    responses(
        (status = 200, description = "All candidates with selection counts", body = RosterResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
/// Return every candidate together with how often each has been picked.
pub async fn get_roster(State(state): State<SharedState>) -> Result<Json<RosterResponse>, AppError> {
    let payload = roster_service::list_roster(&state).await?;
    Ok(Json(payload))
}
