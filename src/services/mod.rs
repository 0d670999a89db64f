/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Weekly summary-order reads and writes.
pub mod order_service;
/// Weighted facilitator selection algorithm.
pub mod picker;
/// Roster listing and seeding.
pub mod roster_service;
/// Weekly selection reads and writes.
pub mod selection_service;
/// Unbiased presentation-order shuffling.
pub mod shuffler;
/// Storage persistence coordinator with reconnect handling.
pub mod storage_supervisor;
/// Week partition-key computation.
pub mod week;
