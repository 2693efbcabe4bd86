pub mod directory;
pub mod history;
pub mod manager;
pub mod sync;

pub use history::Transcript;
pub use manager::{new_session_id, SessionContext, DEFAULT_SESSION_ID};
