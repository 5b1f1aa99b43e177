//! Operation implementations on [`JournalService`](crate::service::JournalService),
//! one module per record kind.

pub mod daily;
pub mod one_on_one;
pub mod task;

pub use task::MergeOutcome;
