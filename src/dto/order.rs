//! DTO definitions for the weekly summary presentation order.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::SummaryOrderEntity,
    dto::{format_system_time, roster::CandidateRef},
};

/// Persisted weekly presentation order resolved against the roster.
#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryOrderView {
    /// Primary key of the order record.
    pub id: Uuid,
    /// Week partition key (`YYYY-MM-DD` of the Saturday).
    pub week: String,
    /// Candidates in presentation order.
    pub ordered: Vec<CandidateRef>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl SummaryOrderView {
    /// Combine an order record with the resolved candidates, preserving order.
    pub fn from_entity(order: SummaryOrderEntity, ordered: Vec<CandidateRef>) -> Self {
        Self {
            id: order.id,
            week: order.week,
            ordered,
            created_at: format_system_time(order.created_at),
        }
    }
}

/// Current-week order, absent when none has been generated yet.
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentOrderResponse {
    /// Week the response refers to.
    pub week: String,
    /// The order record, if one exists for this week.
    pub order: Option<SummaryOrderView>,
}

/// Payload recording an externally shuffled presentation order.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RecordOrderRequest {
    /// Permutation of every known candidate id.
    #[validate(length(min = 1, message = "ordered_candidate_ids must not be empty"))]
    pub ordered_candidate_ids: Vec<Uuid>,
}
