//! Business logic services.

pub mod assignment;
pub mod job_assembly;

pub use assignment::{rank_candidates, AssignmentError, AssignmentOutcome, AssignmentSelection};
pub use job_assembly::{assemble_job, ValidationError};
