//! Weekly facilitator selection: reads, explicit recording, and the
//! server-side weighted draw.

use std::time::SystemTime;

use uuid::Uuid;

use crate::{
    dao::{
        models::{CandidateEntity, SelectionEntity},
        roster_store::RosterStore,
    },
    dto::selection::{CurrentSelectionResponse, SelectionView},
    error::ServiceError,
    services::{picker, picker::WeightedCandidate, week},
    state::SharedState,
};

/// Return this week's selection, if anyone has been picked yet.
pub async fn current_selection(
    state: &SharedState,
) -> Result<CurrentSelectionResponse, ServiceError> {
    let store = state.require_roster_store().await?;
    let week = week::current_week();

    let selection = match store.find_selection(&week).await? {
        Some(selection) => {
            let candidate = store
                .find_candidate(selection.candidate_id)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!(
                        "candidate {} not found",
                        selection.candidate_id
                    ))
                })?;
            Some(SelectionView::from_entity(selection, candidate.into()))
        }
        None => None,
    };

    Ok(CurrentSelectionResponse { week, selection })
}

/// Record an externally chosen winner for the current week.
///
/// Fails with a conflict when the week already has a winner; the caller must
/// treat this as "selection is locked", not retry with another candidate.
pub async fn record_selection(
    state: &SharedState,
    candidate_id: Uuid,
) -> Result<SelectionView, ServiceError> {
    let store = state.require_roster_store().await?;
    let week = week::current_week();

    let candidate = store.find_candidate(candidate_id).await?.ok_or_else(|| {
        ServiceError::InvalidInput(format!("unknown candidate `{candidate_id}`"))
    })?;

    persist_selection(store.as_ref(), week, candidate).await
}

/// Draw this week's winner server-side and persist it.
///
/// The previous winner is resolved from the latest persisted selection record;
/// the client-remembered `last_winner_hint` only applies while no record
/// exists server-side yet.
pub async fn draw_selection(
    state: &SharedState,
    last_winner_hint: Option<Uuid>,
) -> Result<SelectionView, ServiceError> {
    let store = state.require_roster_store().await?;
    let week = week::current_week();

    if store.find_selection(&week).await?.is_some() {
        return Err(already_picked(&week));
    }

    let roster = store.list_candidates().await?;
    if roster.is_empty() {
        return Err(ServiceError::NotFound("roster is empty".into()));
    }

    let mut weighted = Vec::with_capacity(roster.len());
    for candidate in &roster {
        let times_selected = store.selection_count(candidate.id).await?;
        weighted.push(WeightedCandidate {
            id: candidate.id,
            times_selected,
        });
    }

    let previous_winner = match store.latest_selection().await? {
        Some(selection) => Some(selection.candidate_id),
        None => last_winner_hint,
    };

    let winner_id = {
        let mut rng = rand::rng();
        picker::draw_winner(&weighted, previous_winner, &mut rng)
    }
    .ok_or_else(|| ServiceError::NotFound("roster is empty".into()))?;

    let winner = roster
        .into_iter()
        .find(|candidate| candidate.id == winner_id)
        .ok_or_else(|| ServiceError::NotFound(format!("candidate {winner_id} not found")))?;

    persist_selection(store.as_ref(), week, winner).await
}

/// Insert the selection record. The advisory existence check keeps the common
/// path friendly; the storage layer's unique `week` index is what actually
/// decides a race between two concurrent writes.
async fn persist_selection(
    store: &dyn RosterStore,
    week: String,
    candidate: CandidateEntity,
) -> Result<SelectionView, ServiceError> {
    if store.find_selection(&week).await?.is_some() {
        return Err(already_picked(&week));
    }

    let selection = SelectionEntity {
        id: Uuid::new_v4(),
        candidate_id: candidate.id,
        week,
        created_at: SystemTime::now(),
    };

    store.insert_selection(selection.clone()).await?;

    Ok(SelectionView::from_entity(selection, candidate.into()))
}

fn already_picked(week: &str) -> ServiceError {
    ServiceError::Conflict(format!("facilitator already picked for week {week}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::roster_store::memory::MemoryRosterStore, services::roster_service, state::AppState,
    };
    use std::sync::Arc;

    async fn state_with_roster(names: &[&str]) -> (SharedState, Vec<Uuid>) {
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
        (state, ids)
    }

    #[tokio::test]
    async fn fresh_week_has_no_selection() {
        let (state, _ids) = state_with_roster(&["Ada", "Grace"]).await;

        let current = current_selection(&state).await.unwrap();
        assert_eq!(current.week, week::current_week());
        assert!(current.selection.is_none());
    }

    #[tokio::test]
    async fn second_record_for_the_same_week_conflicts() {
        let (state, ids) = state_with_roster(&["Ada", "Grace"]).await;

        let first = record_selection(&state, ids[0]).await.unwrap();

        let err = record_selection(&state, ids[1]).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        // The losing attempt must not have disturbed the recorded winner.
        let current = current_selection(&state).await.unwrap();
        let selection = current.selection.unwrap();
        assert_eq!(selection.id, first.id);
        assert_eq!(selection.candidate.id, ids[0]);
    }

    #[tokio::test]
    async fn unknown_candidate_is_rejected() {
        let (state, _ids) = state_with_roster(&["Ada"]).await;

        let err = record_selection(&state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn draw_persists_a_winner_from_the_roster() {
        let (state, ids) = state_with_roster(&["Ada", "Grace", "Edsger"]).await;

        let drawn = draw_selection(&state, None).await.unwrap();
        assert!(ids.contains(&drawn.candidate.id));

        let current = current_selection(&state).await.unwrap();
        assert_eq!(current.selection.unwrap().id, drawn.id);
    }

    #[tokio::test]
    async fn draw_honours_the_client_hint_when_no_record_exists() {
        let (state, ids) = state_with_roster(&["Ada", "Grace"]).await;

        // With a two-person roster, excluding the hinted previous winner
        // leaves exactly one eligible candidate.
        let drawn = draw_selection(&state, Some(ids[0])).await.unwrap();
        assert_eq!(drawn.candidate.id, ids[1]);
    }

    #[tokio::test]
    async fn draw_is_locked_once_a_selection_exists() {
        let (state, ids) = state_with_roster(&["Ada", "Grace"]).await;

        record_selection(&state, ids[0]).await.unwrap();
        let err = draw_selection(&state, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn draw_on_an_empty_roster_fails() {
        let (state, _ids) = state_with_roster(&[]).await;

        let err = draw_selection(&state, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
