mod batch;
mod chat;
mod error_response;
mod health;
mod multipart;
mod process_file;

pub use batch::{BatchErrorItem, BatchResponse, BatchResultItem, batch_handler};
pub use chat::{ChatRequest, ChatResponse, chat_handler};
pub use error_response::{ErrorResponse, analysis_error_status};
pub use health::{HealthResponse, health_handler};
pub use process_file::{ProcessFileResponse, process_file_handler};
