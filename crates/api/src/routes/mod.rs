//! HTTP route handlers.

pub mod drafts;
pub mod health;
pub mod jobs;
pub mod locations;
pub mod personnel;
