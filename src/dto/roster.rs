//! DTO definitions for the candidate roster.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::models::CandidateEntity;

/// Minimal projection of a candidate referenced from weekly records.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CandidateRef {
    /// Stable identifier for the candidate.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl From<CandidateEntity> for CandidateRef {
    fn from(value: CandidateEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Candidate with the derived historical selection count.
#[derive(Debug, Serialize, ToSchema)]
pub struct CandidateSummary {
    /// Stable identifier for the candidate.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// How many weekly selections reference this candidate.
    pub times_selected: u64,
}

impl CandidateSummary {
    /// Combine a candidate with its derived selection count.
    pub fn from_entity(candidate: CandidateEntity, times_selected: u64) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            times_selected,
        }
    }
}

/// Full roster as served to the picker UI.
#[derive(Debug, Serialize, ToSchema)]
pub struct RosterResponse {
    /// Every known candidate with its selection count.
    pub candidates: Vec<CandidateSummary>,
}
