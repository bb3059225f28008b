//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the event data access contract.
//! - Isolate SQLite query details from store/service orchestration.
//!
//! # Invariants
//! - Repositories store payloads as supplied; boundary validation lives in
//!   the service layer.
//! - Deleting an absent id is a successful no-op, never `NotFound`.

pub mod event_repo;
