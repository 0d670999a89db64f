//! Weekly summary presentation order: reads, explicit recording, and the
//! server-side shuffle.

use std::collections::{HashMap, HashSet};
use std::time::SystemTime;

use uuid::Uuid;

use crate::{
    dao::{
        models::{CandidateEntity, SummaryOrderEntity},
        roster_store::RosterStore,
    },
    dto::{
        order::{CurrentOrderResponse, SummaryOrderView},
        roster::CandidateRef,
    },
    error::ServiceError,
    services::{shuffler, week},
    state::SharedState,
};

/// Return this week's presentation order, if one has been generated yet.
pub async fn current_order(state: &SharedState) -> Result<CurrentOrderResponse, ServiceError> {
    let store = state.require_roster_store().await?;
    let week = week::current_week();

    let order = match store.find_order(&week).await? {
        Some(order) => {
            let roster = store.list_candidates().await?;
            Some(resolve_view(order, &roster))
        }
        None => None,
    };

    Ok(CurrentOrderResponse { week, order })
}

/// Record an externally shuffled presentation order for the current week.
///
/// The order must be a permutation of every known candidate id, and a
/// facilitator must already have been picked for the week.
pub async fn record_order(
    state: &SharedState,
    ordered_candidate_ids: Vec<Uuid>,
) -> Result<SummaryOrderView, ServiceError> {
    let store = state.require_roster_store().await?;
    let week = week::current_week();
    let roster = require_selection_and_roster(store.as_ref(), &week).await?;

    let known: HashSet<Uuid> = roster.iter().map(|candidate| candidate.id).collect();
    if ordered_candidate_ids.len() != known.len() {
        return Err(ServiceError::InvalidInput(format!(
            "order must list each of the {} candidates exactly once",
            known.len()
        )));
    }
    let mut seen = HashSet::with_capacity(ordered_candidate_ids.len());
    for id in &ordered_candidate_ids {
        if !known.contains(id) {
            return Err(ServiceError::InvalidInput(format!(
                "unknown candidate `{id}` in order"
            )));
        }
        if !seen.insert(*id) {
            return Err(ServiceError::InvalidInput(format!(
                "candidate `{id}` appears twice in order"
            )));
        }
    }

    persist_order(store.as_ref(), week, ordered_candidate_ids, &roster).await
}

/// Shuffle the full roster server-side and persist the result as this week's
/// presentation order.
pub async fn generate_order(state: &SharedState) -> Result<SummaryOrderView, ServiceError> {
    let store = state.require_roster_store().await?;
    let week = week::current_week();
    let roster = require_selection_and_roster(store.as_ref(), &week).await?;

    let ids: Vec<Uuid> = roster.iter().map(|candidate| candidate.id).collect();
    let shuffled = {
        let mut rng = rand::rng();
        shuffler::shuffle_order(&ids, &mut rng)
    };

    persist_order(store.as_ref(), week, shuffled, &roster).await
}

/// An order only makes sense once the week has a facilitator.
async fn require_selection_and_roster(
    store: &dyn RosterStore,
    week: &str,
) -> Result<Vec<CandidateEntity>, ServiceError> {
    if store.find_selection(week).await?.is_none() {
        return Err(ServiceError::Conflict(format!(
            "no facilitator picked for week {week} yet"
        )));
    }

    let roster = store.list_candidates().await?;
    if roster.is_empty() {
        return Err(ServiceError::NotFound("roster is empty".into()));
    }
    Ok(roster)
}

/// Insert the order record. As with selections, the advisory existence check
/// is a courtesy; the unique `week` index settles concurrent writes.
async fn persist_order(
    store: &dyn RosterStore,
    week: String,
    ordered_candidate_ids: Vec<Uuid>,
    roster: &[CandidateEntity],
) -> Result<SummaryOrderView, ServiceError> {
    if store.find_order(&week).await?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "summary order already generated for week {week}"
        )));
    }

    let order = SummaryOrderEntity {
        id: Uuid::new_v4(),
        week,
        ordered_candidate_ids,
        created_at: SystemTime::now(),
    };

    store.insert_order(order.clone()).await?;

    Ok(resolve_view(order, roster))
}

fn resolve_view(order: SummaryOrderEntity, roster: &[CandidateEntity]) -> SummaryOrderView {
    let refs: HashMap<Uuid, CandidateRef> = roster
        .iter()
        .map(|candidate| (candidate.id, CandidateRef::from(candidate.clone())))
        .collect();

    let ordered = order
        .ordered_candidate_ids
        .iter()
        .filter_map(|id| refs.get(id).cloned())
        .collect();

    SummaryOrderView::from_entity(order, ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::roster_store::memory::MemoryRosterStore,
        services::{roster_service, selection_service},
        state::AppState,
    };
    use std::sync::Arc;

    async fn state_with_winner(names: &[&str]) -> (SharedState, Vec<Uuid>) {
        let store = MemoryRosterStore::new();
        let names: Vec<String> = names.iter().map(|name| name.to_string()).collect();
        roster_service::seed_roster(&store, &names).await.unwrap();

        let ids: Vec<Uuid> = store
            .list_candidates()
            .await
            .unwrap()
            .into_iter()
            .map(|candidate| candidate.id)
            .collect();

        let state = AppState::new();
        state.set_roster_store(Arc::new(store)).await;
        selection_service::record_selection(&state, ids[0])
            .await
            .unwrap();
        (state, ids)
    }

    #[tokio::test]
    async fn recorded_order_reads_back_identically() {
        let (state, ids) = state_with_winner(&["Ada", "Grace", "Edsger", "Barbara", "Tony"]).await;

        let mut permutation = ids.clone();
        permutation.reverse();

        let recorded = record_order(&state, permutation.clone()).await.unwrap();
        let read_back: Vec<Uuid> = recorded.ordered.iter().map(|c| c.id).collect();
        assert_eq!(read_back, permutation);

        let current = current_order(&state).await.unwrap().order.unwrap();
        let persisted: Vec<Uuid> = current.ordered.iter().map(|c| c.id).collect();
        assert_eq!(persisted, permutation);
    }

    #[tokio::test]
    async fn order_requires_a_winner_first() {
        let store = MemoryRosterStore::new();
        roster_service::seed_roster(&store, &["Ada".to_string()])
            .await
            .unwrap();
        let ids: Vec<Uuid> = store
            .list_candidates()
            .await
            .unwrap()
            .into_iter()
            .map(|candidate| candidate.id)
            .collect();

        let state = AppState::new();
        state.set_roster_store(Arc::new(store)).await;

        let err = record_order(&state, ids).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn second_order_for_the_same_week_conflicts() {
        let (state, ids) = state_with_winner(&["Ada", "Grace"]).await;

        record_order(&state, ids.clone()).await.unwrap();
        let err = record_order(&state, ids).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn non_permutations_are_rejected() {
        let (state, ids) = state_with_winner(&["Ada", "Grace", "Edsger"]).await;

        let short = vec![ids[0], ids[1]];
        assert!(matches!(
            record_order(&state, short).await.unwrap_err(),
            ServiceError::InvalidInput(_)
        ));

        let duplicated = vec![ids[0], ids[1], ids[1]];
        assert!(matches!(
            record_order(&state, duplicated).await.unwrap_err(),
            ServiceError::InvalidInput(_)
        ));

        let foreign = vec![ids[0], ids[1], Uuid::new_v4()];
        assert!(matches!(
            record_order(&state, foreign).await.unwrap_err(),
            ServiceError::InvalidInput(_)
        ));
    }

    #[tokio::test]
    async fn generated_order_is_a_permutation_of_the_roster() {
        let (state, ids) = state_with_winner(&["Ada", "Grace", "Edsger", "Barbara"]).await;

        let generated = generate_order(&state).await.unwrap();
        let mut got: Vec<Uuid> = generated.ordered.iter().map(|c| c.id).collect();
        let mut expected = ids.clone();
        got.sort();
        expected.sort();
        assert_eq!(got, expected);

        // Once generated, the order is locked for the week.
        assert!(matches!(
            generate_order(&state).await.unwrap_err(),
            ServiceError::Conflict(_)
        ));
    }
}
