use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::selection::{
        CurrentSelectionResponse, DrawSelectionRequest, RecordSelectionRequest, SelectionView,
    },
    error::AppError,
    services::selection_service,
    state::SharedState,
};

/// Weekly selection endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/selection/current", get(get_current_selection))
        .route("/selection", post(record_selection))
        .route("/selection/draw", post(draw_selection))
}

#[utoipa::path(
    get,
    path = "/selection/current",
    tag = "selection",
    responses(
        (status = 200, description = "Selection for the current week, null when nobody is picked yet", body = CurrentSelectionResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
/// Return this week's facilitator selection, if any.
pub async fn get_current_selection(
    State(state): State<SharedState>,
) -> Result<Json<CurrentSelectionResponse>, AppError> {
    let payload = selection_service::current_selection(&state).await?;
    Ok(Json(payload))
}

#[utoipa::path(
    post,
    path = "/selection",
    tag = "selection",
    request_body = RecordSelectionRequest,
    responses(
        (status = 200, description = "Selection recorded", body = SelectionView),
        (status = 400, description = "Unknown candidate"),
        (status = 409, description = "A facilitator is already picked for this week"),
        (status = 503, description = "Storage unavailable")
    )
)]
/// Record an externally chosen facilitator for the current week.
pub async fn record_selection(
    State(state): State<SharedState>,
    Json(payload): Json<RecordSelectionRequest>,
) -> Result<Json<SelectionView>, AppError> {
    let view = selection_service::record_selection(&state, payload.candidate_id).await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/selection/draw",
    tag = "selection",
    request_body = DrawSelectionRequest,
    responses(
        (status = 200, description = "Winner drawn and recorded", body = SelectionView),
        (status = 404, description = "Roster is empty"),
        (status = 409, description = "A facilitator is already picked for this week"),
        (status = 503, description = "Storage unavailable")
    )
)]
/// Draw this week's facilitator with the weighted selector and record it.
pub async fn draw_selection(
    State(state): State<SharedState>,
    Json(payload): Json<DrawSelectionRequest>,
) -> Result<Json<SelectionView>, AppError> {
    let view = selection_service::draw_selection(&state, payload.last_winner).await?;
    Ok(Json(view))
}
