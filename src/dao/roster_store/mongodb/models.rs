use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{CandidateEntity, SelectionEntity, SummaryOrderEntity};

/// Candidate document as stored in the `candidates` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoCandidateDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    name: String,
    created_at: DateTime,
}

impl From<CandidateEntity> for MongoCandidateDocument {
    fn from(value: CandidateEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<MongoCandidateDocument> for CandidateEntity {
    fn from(value: MongoCandidateDocument) -> Self {
        Self {
            id: value.id,
            name: value.name,
            created_at: value.created_at.to_system_time(),
        }
    }
}

/// Weekly selection document as stored in the `selections` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoSelectionDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    candidate_id: Uuid,
    week: String,
    created_at: DateTime,
}

impl From<SelectionEntity> for MongoSelectionDocument {
    fn from(value: SelectionEntity) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            week: value.week,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<MongoSelectionDocument> for SelectionEntity {
    fn from(value: MongoSelectionDocument) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            week: value.week,
            created_at: value.created_at.to_system_time(),
        }
    }
}

/// Weekly summary-order document as stored in the `summary_orders` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoSummaryOrderDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    week: String,
    ordered_candidate_ids: Vec<Uuid>,
    created_at: DateTime,
}

impl From<SummaryOrderEntity> for MongoSummaryOrderDocument {
    fn from(value: SummaryOrderEntity) -> Self {
        Self {
            id: value.id,
            week: value.week,
            ordered_candidate_ids: value.ordered_candidate_ids,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<MongoSummaryOrderDocument> for SummaryOrderEntity {
    fn from(value: MongoSummaryOrderDocument) -> Self {
        Self {
            id: value.id,
            week: value.week,
            ordered_candidate_ids: value.ordered_candidate_ids,
            created_at: value.created_at.to_system_time(),
        }
    }
}

/// Encode a UUID the way the driver stores serde-serialized `Uuid` fields so
/// filters match documents written through the typed collections.
pub fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

/// Filter matching a document by its `_id` UUID.
pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}
