mod manager;
mod storage;
mod window;

pub use manager::{require_session_name, Listing, SessionManager};
pub use storage::{Storage, Store};
pub use window::{index_rows, Sessions, Window};
