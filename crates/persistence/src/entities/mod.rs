//! Entity definitions (database row mappings).

pub mod job;
pub mod job_draft;
pub mod location;
pub mod personnel;

pub use job::JobEntity;
pub use job_draft::JobDraftEntity;
pub use location::LocationEntity;
pub use personnel::PersonnelEntity;
