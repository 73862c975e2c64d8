mod analyze;
pub mod dto;
mod error;
mod health;
mod topic;
mod upload;

pub use analyze::analyze_handler;
pub use error::{ErrorResponse, error_response, status_for};
pub use health::health_handler;
pub use topic::topic_handler;
pub use upload::upload_handler;
