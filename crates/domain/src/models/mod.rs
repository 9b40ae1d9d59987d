//! Domain models.

pub mod draft;
pub mod job;
pub mod job_number;
pub mod location;
pub mod personnel;
pub mod session;
pub mod snapshot;

pub use draft::{DraftState, JobDraft};
pub use job::{JobRecord, JobStatus, NewJob};
pub use job_number::{FormatError, JobNumber, JobNumberSlot};
pub use location::Location;
pub use personnel::{PersonnelProfile, RankingMode, SeniorityTier, StaffRole};
pub use session::{Session, SessionRole};
pub use snapshot::FormSnapshot;
