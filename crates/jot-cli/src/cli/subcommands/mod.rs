mod log;
mod meeting;
mod task;

pub use log::LogCommands;
pub use meeting::MeetingCommands;
pub use task::TaskCommands;
