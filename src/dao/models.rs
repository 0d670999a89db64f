use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Person eligible to be picked as facilitator, as persisted in the roster.
///
/// Candidates are created once by the seeding utility and never mutated. The
/// "times selected" figure is derived by counting selection records, it is
/// never stored on the candidate itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CandidateEntity {
    /// Stable identifier for the candidate.
    pub id: Uuid,
    /// Display name, unique across the roster.
    pub name: String,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
}

/// One persisted fact per week: who was picked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionEntity {
    /// Primary key of the selection record.
    pub id: Uuid,
    /// Candidate chosen for this week.
    pub candidate_id: Uuid,
    /// Partition key: ISO date (`YYYY-MM-DD`) of the week's Saturday.
    pub week: String,
    /// Creation timestamp; also orders records when resolving the latest win.
    pub created_at: SystemTime,
}

/// One persisted fact per week: in what order people present their summaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryOrderEntity {
    /// Primary key of the order record.
    pub id: Uuid,
    /// Partition key: ISO date (`YYYY-MM-DD`) of the week's Saturday.
    pub week: String,
    /// Permutation of all candidate ids known at generation time.
    pub ordered_candidate_ids: Vec<Uuid>,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
}
