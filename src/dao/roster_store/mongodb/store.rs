use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Client, Collection, Database, bson::doc, options::IndexOptions};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{
        MongoCandidateDocument, MongoSelectionDocument, MongoSummaryOrderDocument, doc_id,
        uuid_as_binary,
    },
};
use crate::dao::{
    models::{CandidateEntity, SelectionEntity, SummaryOrderEntity},
    roster_store::RosterStore,
    storage::{StorageError, StorageResult},
};

const CANDIDATE_COLLECTION_NAME: &str = "candidates";
const SELECTION_COLLECTION_NAME: &str = "selections";
const ORDER_COLLECTION_NAME: &str = "summary_orders";

/// MongoDB-backed [`RosterStore`].
#[derive(Clone)]
pub struct MongoRosterStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoRosterStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    /// Create the indexes the application relies on. The unique `week` indexes
    /// are what actually guarantees "at most one record per week" when two
    /// requests race past the application-level existence check.
    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        let candidates = database.collection::<mongodb::bson::Document>(CANDIDATE_COLLECTION_NAME);
        let name_index = mongodb::IndexModel::builder()
            .keys(doc! {"name": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("candidate_name_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        candidates
            .create_index(name_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: CANDIDATE_COLLECTION_NAME,
                index: "name",
                source,
            })?;

        let selections = database.collection::<mongodb::bson::Document>(SELECTION_COLLECTION_NAME);
        let week_index = mongodb::IndexModel::builder()
            .keys(doc! {"week": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("selection_week_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        selections
            .create_index(week_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: SELECTION_COLLECTION_NAME,
                index: "week",
                source,
            })?;

        let created_index = mongodb::IndexModel::builder()
            .keys(doc! {"created_at": -1})
            .options(
                IndexOptions::builder()
                    .name(Some("selection_created_idx".to_owned()))
                    .build(),
            )
            .build();
        selections
            .create_index(created_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: SELECTION_COLLECTION_NAME,
                index: "created_at",
                source,
            })?;

        let orders = database.collection::<mongodb::bson::Document>(ORDER_COLLECTION_NAME);
        let order_week_index = mongodb::IndexModel::builder()
            .keys(doc! {"week": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("order_week_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        orders
            .create_index(order_week_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: ORDER_COLLECTION_NAME,
                index: "week",
                source,
            })?;

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn candidate_collection(&self) -> Collection<MongoCandidateDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoCandidateDocument>(CANDIDATE_COLLECTION_NAME)
    }

    async fn selection_collection(&self) -> Collection<MongoSelectionDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoSelectionDocument>(SELECTION_COLLECTION_NAME)
    }

    async fn order_collection(&self) -> Collection<MongoSummaryOrderDocument> {
        let guard = self.inner.state.read().await;
        guard
            .database
            .collection::<MongoSummaryOrderDocument>(ORDER_COLLECTION_NAME)
    }

    async fn list_candidates(&self) -> MongoResult<Vec<CandidateEntity>> {
        let collection = self.candidate_collection().await;

        let documents: Vec<MongoCandidateDocument> = collection
            .find(doc! {})
            .await
            .map_err(|source| MongoDaoError::ListCandidates { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListCandidates { source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn find_candidate(&self, id: Uuid) -> MongoResult<Option<CandidateEntity>> {
        let collection = self.candidate_collection().await;

        let document = collection
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadCandidate { source })?;

        Ok(document.map(Into::into))
    }

    async fn find_candidate_by_name(&self, name: String) -> MongoResult<Option<CandidateEntity>> {
        let collection = self.candidate_collection().await;

        let document = collection
            .find_one(doc! {"name": name})
            .await
            .map_err(|source| MongoDaoError::LoadCandidate { source })?;

        Ok(document.map(Into::into))
    }

    async fn insert_candidate(&self, candidate: CandidateEntity) -> MongoResult<()> {
        let id = candidate.id;
        let document: MongoCandidateDocument = candidate.into();
        let collection = self.candidate_collection().await;

        collection
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::SaveCandidate { id, source })?;

        Ok(())
    }

    async fn selection_count(&self, candidate_id: Uuid) -> MongoResult<u64> {
        let collection = self.selection_collection().await;

        collection
            .count_documents(doc! {"candidate_id": uuid_as_binary(candidate_id)})
            .await
            .map_err(|source| MongoDaoError::CountSelections {
                id: candidate_id,
                source,
            })
    }

    async fn find_selection(&self, week: String) -> MongoResult<Option<SelectionEntity>> {
        let collection = self.selection_collection().await;

        let document = collection
            .find_one(doc! {"week": week})
            .await
            .map_err(|source| MongoDaoError::LoadSelection { source })?;

        Ok(document.map(Into::into))
    }

    async fn latest_selection(&self) -> MongoResult<Option<SelectionEntity>> {
        let collection = self.selection_collection().await;

        let document = collection
            .find_one(doc! {})
            .sort(doc! {"created_at": -1})
            .await
            .map_err(|source| MongoDaoError::LoadSelection { source })?;

        Ok(document.map(Into::into))
    }

    async fn insert_selection(&self, selection: SelectionEntity) -> MongoResult<()> {
        let week = selection.week.clone();
        let document: MongoSelectionDocument = selection.into();
        let collection = self.selection_collection().await;

        collection
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::SaveSelection { week, source })?;

        Ok(())
    }

    async fn find_order(&self, week: String) -> MongoResult<Option<SummaryOrderEntity>> {
        let collection = self.order_collection().await;

        let document = collection
            .find_one(doc! {"week": week})
            .await
            .map_err(|source| MongoDaoError::LoadOrder { source })?;

        Ok(document.map(Into::into))
    }

    async fn insert_order(&self, order: SummaryOrderEntity) -> MongoResult<()> {
        let week = order.week.clone();
        let document: MongoSummaryOrderDocument = order.into();
        let collection = self.order_collection().await;

        collection
            .insert_one(&document)
            .await
            .map_err(|source| MongoDaoError::SaveOrder { week, source })?;

        Ok(())
    }
}

/// Translate a rejected insert into the backend-agnostic duplicate signal.
fn map_insert_error(
    err: MongoDaoError,
    collection: &'static str,
    key: &'static str,
) -> StorageError {
    if err.is_duplicate_key() {
        StorageError::Duplicate { collection, key }
    } else {
        err.into()
    }
}

impl RosterStore for MongoRosterStore {
    fn list_candidates(&self) -> BoxFuture<'static, StorageResult<Vec<CandidateEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_candidates().await.map_err(Into::into) })
    }

    fn find_candidate(
        &self,
        id: Uuid,
    ) -> BoxFuture<'static, StorageResult<Option<CandidateEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_candidate(id).await.map_err(Into::into) })
    }

    fn find_candidate_by_name(
        &self,
        name: &str,
    ) -> BoxFuture<'static, StorageResult<Option<CandidateEntity>>> {
        let store = self.clone();
        let name = name.to_owned();
        Box::pin(async move { store.find_candidate_by_name(name).await.map_err(Into::into) })
    }

    fn insert_candidate(
        &self,
        candidate: CandidateEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .insert_candidate(candidate)
                .await
                .map_err(|err| map_insert_error(err, CANDIDATE_COLLECTION_NAME, "name"))
        })
    }

    fn selection_count(&self, candidate_id: Uuid) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.selection_count(candidate_id).await.map_err(Into::into) })
    }

    fn find_selection(
        &self,
        week: &str,
    ) -> BoxFuture<'static, StorageResult<Option<SelectionEntity>>> {
        let store = self.clone();
        let week = week.to_owned();
        Box::pin(async move { store.find_selection(week).await.map_err(Into::into) })
    }

    fn latest_selection(&self) -> BoxFuture<'static, StorageResult<Option<SelectionEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.latest_selection().await.map_err(Into::into) })
    }

    fn insert_selection(
        &self,
        selection: SelectionEntity,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .insert_selection(selection)
                .await
                .map_err(|err| map_insert_error(err, SELECTION_COLLECTION_NAME, "week"))
        })
    }

    fn find_order(
        &self,
        week: &str,
    ) -> BoxFuture<'static, StorageResult<Option<SummaryOrderEntity>>> {
        let store = self.clone();
        let week = week.to_owned();
        Box::pin(async move { store.find_order(week).await.map_err(Into::into) })
    }

    fn insert_order(&self, order: SummaryOrderEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .insert_order(order)
                .await
                .map_err(|err| map_insert_error(err, ORDER_COLLECTION_NAME, "week"))
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
