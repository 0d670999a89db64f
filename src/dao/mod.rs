//! Persistence layer: entities, the store abstraction, and backends.

/// Entities shared between the storage backends and the service layer.
pub mod models;
/// Roster/weekly-record store abstraction and backends.
pub mod roster_store;
/// Backend-agnostic storage errors.
pub mod storage;
