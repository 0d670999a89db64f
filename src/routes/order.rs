use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_valid::Valid;

use crate::{
    dto::order::{CurrentOrderResponse, RecordOrderRequest, SummaryOrderView},
    error::AppError,
    services::order_service,
    state::SharedState,
};

/// Weekly summary-order endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/order/current", get(get_current_order))
        .route("/order", post(record_order))
        .route("/order/generate", post(generate_order))
}

#[utoipa::path(
    get,
    path = "/order/current",
    tag = "order",
    responses(
        (status = 200, description = "Order for the current week, null when none is generated yet", body = CurrentOrderResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
/// Return this week's summary presentation order, if any.
pub async fn get_current_order(
    State(state): State<SharedState>,
) -> Result<Json<CurrentOrderResponse>, AppError> {
    let payload = order_service::current_order(&state).await?;
    Ok(Json(payload))
}

#[utoipa::path(
    post,
    path = "/order",
    tag = "order",
    request_body = RecordOrderRequest,
    responses(
        (status = 200, description = "Order recorded", body = SummaryOrderView),
        (status = 400, description = "Order is not a permutation of the roster"),
        (status = 409, description = "No winner yet, or an order already exists for this week"),
        (status = 503, description = "Storage unavailable")
    )
)]
/// Record an externally shuffled presentation order for the current week.
pub async fn record_order(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<RecordOrderRequest>>,
) -> Result<Json<SummaryOrderView>, AppError> {
    let view = order_service::record_order(&state, payload.ordered_candidate_ids).await?;
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/order/generate",
    tag = "order",
    responses(
        (status = 200, description = "Order shuffled and recorded", body = SummaryOrderView),
        (status = 409, description = "No winner yet, or an order already exists for this week"),
        (status = 503, description = "Storage unavailable")
    )
)]
/// Shuffle the roster server-side and record the result as this week's order.
pub async fn generate_order(
    State(state): State<SharedState>,
) -> Result<Json<SummaryOrderView>, AppError> {
    let view = order_service::generate_order(&state).await?;
    Ok(Json(view))
}
