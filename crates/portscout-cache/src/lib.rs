// Session-scoped persistence for UI state
pub mod session;

pub use session::{SessionError, SessionStore};
