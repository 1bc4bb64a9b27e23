pub mod manager;
pub mod persistence;
pub mod store;
pub mod types;

pub use manager::{ChatInit, ChatInitState, SessionManager};
pub use persistence::Persistence;
pub use store::SessionStore;
pub use types::{SessionMetadata, SessionOverview, SessionRecord};
