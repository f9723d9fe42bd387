//! HTTP API handlers

mod health;
mod info;
mod listing;
mod processing;
mod upload;

pub use health::health_check;
pub use info::service_info;
pub use listing::{list_database, list_files};
pub use processing::trigger_processing;
pub use upload::upload_file;
