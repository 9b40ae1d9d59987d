//! Domain layer for the inspection job management backend.
//!
//! This crate contains:
//! - Domain models (Location, JobDraft, JobRecord, PersonnelProfile)
//! - The job number codec and status state machine
//! - Business logic services (staff ranking, job assembly)
//! - Domain error types

pub mod models;
pub mod services;
