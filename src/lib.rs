//! Todo sessions that survive across chats, with contextual display triggers
//! and bordered, scored rendering.

pub mod board;
pub mod config;
pub mod presentation;
pub mod session;
pub mod todo;
pub mod trigger;
pub mod utils;

pub use board::{DisplayOutput, TodoBoard};
pub use utils::{Result, TodoBoardError};
