//! In-memory [`RosterStore`] used by service-layer tests. Enforces the same
//! per-week uniqueness the MongoDB indexes do.

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{
    models::{CandidateEntity, SelectionEntity, SummaryOrderEntity},
    roster_store::RosterStore,
    storage::{StorageError, StorageResult},
};

#[derive(Default)]
struct Inner {
    candidates: Vec<CandidateEntity>,
    selections: Vec<SelectionEntity>,
    orders: Vec<SummaryOrderEntity>,
}

/// Vec-backed store; insertion order stands in for `created_at` ordering.
#[derive(Clone, Default)]
pub struct MemoryRosterStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryRosterStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store poisoned")
    }
}

impl RosterStore for MemoryRosterStore {
    fn list_candidates(&self) -> BoxFuture<'static, StorageResult<Vec<CandidateEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.lock().candidates.clone()) })
    }

    fn find_candidate(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<CandidateEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .lock()
                .candidates
                .iter()
                .find(|candidate| candidate.id == id)
                .cloned())
        })
    }

    fn find_candidate_by_name(
        &self,
        name: &str,
    ) -> BoxFuture<'static, StorageResult<Option<CandidateEntity>>> {
        let store = self.clone();
        let name = name.to_owned();
        Box::pin(async move {
            Ok(store
                .lock()
                .candidates
                .iter()
                .find(|candidate| candidate.name == name)
                .cloned())
        })
    }

    fn insert_candidate(
        &self,
        candidate: CandidateEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut inner = store.lock();
            if inner.candidates.iter().any(|c| c.name == candidate.name) {
                return Err(StorageError::Duplicate {
                    collection: "candidates",
                    key: "name",
                });
            }
            inner.candidates.push(candidate);
            Ok(())
        })
    }

    fn selection_count(&self, candidate_id: Uuid) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            Ok(store
                .lock()
                .selections
                .iter()
                .filter(|selection| selection.candidate_id == candidate_id)
                .count() as u64)
        })
    }

    fn find_selection(
        &self,
        week: &str,
    ) -> BoxFuture<'static, StorageResult<Option<SelectionEntity>>> {
        let store = self.clone();
        let week = week.to_owned();
        Box::pin(async move {
            Ok(store
                .lock()
                .selections
                .iter()
                .find(|selection| selection.week == week)
                .cloned())
        })
    }

    fn latest_selection(&self) -> BoxFuture<'static, StorageResult<Option<SelectionEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.lock().selections.last().cloned()) })
    }

    fn insert_selection(
        &self,
        selection: SelectionEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut inner = store.lock();
            if inner.selections.iter().any(|s| s.week == selection.week) {
                return Err(StorageError::Duplicate {
                    collection: "selections",
                    key: "week",
                });
            }
            inner.selections.push(selection);
            Ok(())
        })
    }

    fn find_order(
        &self,
        week: &str,
    ) -> BoxFuture<'static, StorageResult<Option<SummaryOrderEntity>>> {
        let store = self.clone();
        let week = week.to_owned();
        Box::pin(async move {
            Ok(store
                .lock()
                .orders
                .iter()
                .find(|order| order.week == week)
                .cloned())
        })
    }

    fn insert_order(&self, order: SummaryOrderEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut inner = store.lock();
            if inner.orders.iter().any(|o| o.week == order.week) {
                return Err(StorageError::Duplicate {
                    collection: "summary_orders",
                    key: "week",
                });
            }
            inner.orders.push(order);
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async move { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async move { Ok(()) })
    }
}
