//! DTO definitions for the weekly facilitator selection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dao::models::SelectionEntity,
    dto::{format_system_time, roster::CandidateRef},
};

/// Persisted weekly selection resolved against the roster.
#[derive(Debug, Serialize, ToSchema)]
pub struct SelectionView {
    /// Primary key of the selection record.
    pub id: Uuid,
    /// Week partition key (`YYYY-MM-DD` of the Saturday).
    pub week: String,
    /// The winning candidate.
    pub candidate: CandidateRef,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl SelectionView {
    /// Combine a selection record with the resolved winning candidate.
    pub fn from_entity(selection: SelectionEntity, candidate: CandidateRef) -> Self {
        Self {
            id: selection.id,
            week: selection.week,
            candidate,
            created_at: format_system_time(selection.created_at),
        }
    }
}

/// Current-week selection, absent when nobody has been picked yet.
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentSelectionResponse {
    /// Week the response refers to.
    pub week: String,
    /// The selection record, if one exists for this week.
    pub selection: Option<SelectionView>,
}

/// Payload recording an externally chosen winner for the current week.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordSelectionRequest {
    /// Candidate to record as this week's facilitator.
    pub candidate_id: Uuid,
}

/// Payload asking the backend to draw this week's winner itself.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DrawSelectionRequest {
    /// Client-remembered previous winner, used only while no selection record
    /// exists server-side yet.
    #[serde(default)]
    pub last_winner: Option<Uuid>,
}
