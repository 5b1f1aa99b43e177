//! Entity structs for the journal.
//!
//! Each entity is persisted as one pretty-printed JSON file (see
//! `jot-store`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema` for JSON roundtrip and schema validation.

mod daily;
mod entry;
mod one_on_one;
mod task;

pub use daily::DailyActivity;
pub use entry::{Entry, entry_kind};
pub use one_on_one::OneOnOne;
pub use task::Task;
