#[cfg(test)]
pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{CandidateEntity, SelectionEntity, SummaryOrderEntity};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the persistence layer for the candidate roster and the
/// weekly selection / summary-order records.
///
/// Backends must enforce uniqueness of the `week` field on both weekly record
/// collections and surface violations as [`StorageError::Duplicate`]; callers
/// treat that rejection as the authoritative "already picked this week"
/// signal.
///
/// [`StorageError::Duplicate`]: crate::dao::storage::StorageError::Duplicate
pub trait RosterStore: Send + Sync {
    /// List every candidate in the roster.
    fn list_candidates(&self) -> BoxFuture<'static, StorageResult<Vec<CandidateEntity>>>;
    /// Look a candidate up by id.
    fn find_candidate(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<CandidateEntity>>>;
    /// Look a candidate up by display name (used by idempotent seeding).
    fn find_candidate_by_name(
        &self,
        name: &str,
    ) -> BoxFuture<'static, StorageResult<Option<CandidateEntity>>>;
    /// Insert a new candidate.
    fn insert_candidate(
        &self,
        candidate: CandidateEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Number of selection records referencing the candidate.
    fn selection_count(&self, candidate_id: Uuid) -> BoxFuture<'static, StorageResult<u64>>;
    /// Selection record for the given week, if one exists.
    fn find_selection(
        &self,
        week: &str,
    ) -> BoxFuture<'static, StorageResult<Option<SelectionEntity>>>;
    /// Most recently created selection record across all weeks.
    fn latest_selection(&self) -> BoxFuture<'static, StorageResult<Option<SelectionEntity>>>;
    /// Insert a selection record; at most one may exist per week.
    fn insert_selection(
        &self,
        selection: SelectionEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Summary-order record for the given week, if one exists.
    fn find_order(
        &self,
        week: &str,
    ) -> BoxFuture<'static, StorageResult<Option<SummaryOrderEntity>>>;
    /// Insert a summary-order record; at most one may exist per week.
    fn insert_order(&self, order: SummaryOrderEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Cheap connectivity probe used by the health endpoint and supervisor.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Re-establish the underlying connection after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
