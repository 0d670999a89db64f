use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for Growing Minds Back.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::roster::get_roster,
        crate::routes::selection::get_current_selection,
        crate::routes::selection::record_selection,
        crate::routes::selection::draw_selection,
        crate::routes::order::get_current_order,
        crate::routes::order::record_order,
        crate::routes::order::generate_order,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::roster::CandidateRef,
            crate::dto::roster::CandidateSummary,
            crate::dto::roster::RosterResponse,
            crate::dto::selection::SelectionView,
            crate::dto::selection::CurrentSelectionResponse,
            crate::dto::selection::RecordSelectionRequest,
            crate::dto::selection::DrawSelectionRequest,
            crate::dto::order::SummaryOrderView,
            crate::dto::order::CurrentOrderResponse,
            crate::dto::order::RecordOrderRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "roster", description = "Candidate roster with selection counts"),
        (name = "selection", description = "Weekly facilitator selection"),
        (name = "order", description = "Weekly summary presentation order"),
    )
)]
pub struct ApiDoc;
