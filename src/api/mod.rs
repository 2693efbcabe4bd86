pub mod client;
pub mod error;
pub mod models;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use models::{ChatOutcome, Message, Role};
