use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use thiserror::Error;
use uuid::Uuid;

/// Result alias for MongoDB DAO operations.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Errors raised by the MongoDB roster store.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection URI could not be parsed.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// The offending URI.
        uri: String,
        #[source]
        source: MongoError,
    },
    /// A required environment variable is missing.
    #[error("missing environment variable `{var}`")]
    MissingEnvVar {
        /// Name of the missing variable.
        var: &'static str,
    },
    /// The client could not be constructed from the parsed options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    /// The initial connection ping never succeeded.
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        /// Number of attempts made before giving up.
        attempts: u32,
        #[source]
        source: MongoError,
    },
    /// A routine health-check ping failed.
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    /// Index creation failed at startup.
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        /// Collection the index belongs to.
        collection: &'static str,
        /// Indexed field(s).
        index: &'static str,
        #[source]
        source: MongoError,
    },
    /// A candidate document could not be written.
    #[error("failed to save candidate `{id}`")]
    SaveCandidate {
        /// Candidate primary key.
        id: Uuid,
        #[source]
        source: MongoError,
    },
    /// A candidate lookup failed.
    #[error("failed to load candidate")]
    LoadCandidate {
        #[source]
        source: MongoError,
    },
    /// The roster listing query failed.
    #[error("failed to list candidates")]
    ListCandidates {
        #[source]
        source: MongoError,
    },
    /// A selection record could not be written.
    #[error("failed to save selection for week `{week}`")]
    SaveSelection {
        /// Week partition key of the rejected write.
        week: String,
        #[source]
        source: MongoError,
    },
    /// A selection lookup failed.
    #[error("failed to load selection")]
    LoadSelection {
        #[source]
        source: MongoError,
    },
    /// The per-candidate selection count query failed.
    #[error("failed to count selections for candidate `{id}`")]
    CountSelections {
        /// Candidate whose records were being counted.
        id: Uuid,
        #[source]
        source: MongoError,
    },
    /// A summary-order record could not be written.
    #[error("failed to save summary order for week `{week}`")]
    SaveOrder {
        /// Week partition key of the rejected write.
        week: String,
        #[source]
        source: MongoError,
    },
    /// A summary-order lookup failed.
    #[error("failed to load summary order")]
    LoadOrder {
        #[source]
        source: MongoError,
    },
}

impl MongoDaoError {
    /// Whether the underlying driver error reports a unique-index violation
    /// (server error code 11000 on the rejected write).
    pub fn is_duplicate_key(&self) -> bool {
        match self {
            MongoDaoError::SaveCandidate { source, .. }
            | MongoDaoError::SaveSelection { source, .. }
            | MongoDaoError::SaveOrder { source, .. } => duplicate_key(source),
            _ => false,
        }
    }
}

fn duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11_000
    )
}
