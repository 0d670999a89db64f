//! Roster projections and the idempotent seeding routine.

use std::time::SystemTime;

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::{models::CandidateEntity, roster_store::RosterStore},
    dto::roster::{CandidateSummary, RosterResponse},
    error::ServiceError,
    state::SharedState,
};

/// List every candidate together with its derived selection count.
pub async fn list_roster(state: &SharedState) -> Result<RosterResponse, ServiceError> {
    let store = state.require_roster_store().await?;
    let candidates = store.list_candidates().await?;

    let mut summaries = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let times_selected = store.selection_count(candidate.id).await?;
        summaries.push(CandidateSummary::from_entity(candidate, times_selected));
    }

    Ok(RosterResponse {
        candidates: summaries,
    })
}

/// Tally of what the seeding pass did.
#[derive(Debug, Default)]
pub struct SeedOutcome {
    /// Candidates created by this pass.
    pub created: usize,
    /// Candidates that already existed and were left alone.
    pub existing: usize,
}

/// Ensure every configured name exists in the roster exactly once.
///
/// Idempotent per name: existing candidates are skipped, and a concurrent
/// seeder winning the insert race counts as existing.
pub async fn seed_roster(
    store: &dyn RosterStore,
    names: &[String],
) -> Result<SeedOutcome, ServiceError> {
    let mut outcome = SeedOutcome::default();

    for name in names {
        if store.find_candidate_by_name(name).await?.is_some() {
            info!(name = %name, "candidate already exists");
            outcome.existing += 1;
            continue;
        }

        let candidate = CandidateEntity {
            id: Uuid::new_v4(),
            name: name.clone(),
            created_at: SystemTime::now(),
        };

        match store.insert_candidate(candidate).await {
            Ok(()) => {
                info!(name = %name, "created candidate");
                outcome.created += 1;
            }
            Err(err) if err.is_duplicate() => {
                info!(name = %name, "candidate created concurrently");
                outcome.existing += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(outcome)
}
