//! Repository implementations for database operations.

pub mod job;
pub mod job_draft;
pub mod location;
pub mod personnel;
pub mod sequence;

pub use job::JobRepository;
pub use job_draft::{DraftInput, JobDraftRepository};
pub use location::LocationRepository;
pub use personnel::PersonnelRepository;
pub use sequence::SequenceRepository;
