pub mod scheduler;
pub mod stale_drafts;

pub use scheduler::JobScheduler;
pub use stale_drafts::StaleDraftSweep;
