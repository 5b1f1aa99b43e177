pub mod analytics;
pub mod dispatch;
pub mod export;
pub mod import;
pub mod log;
pub mod meeting;
pub mod recommend;
pub mod search;
pub mod shared;
pub mod task;
