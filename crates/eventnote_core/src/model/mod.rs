//! Domain model for scheduled events.
//!
//! # Responsibility
//! - Define the record shape shared by storage and callers.
//! - Keep boundary validation next to the payload it guards.
//!
//! # Invariants
//! - Every stored event is identified by a store-assigned `EventId`.
//! - Events are immutable once stored; there is no update path.

pub mod event;
