pub mod autosave;
pub mod finalize;
pub mod numbering;
