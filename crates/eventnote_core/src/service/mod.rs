//! Core use-case services.
//!
//! # Responsibility
//! - Validate caller input before it reaches storage.
//! - Keep presentation layers decoupled from storage details.

pub mod event_service;
