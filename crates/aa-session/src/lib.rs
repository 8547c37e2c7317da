//! Session layer for the Anchor & Adjust demo.
//!
//! Holds the estimation question catalog, the persisted session state
//! (selected question, last anchor, last roll) and the screen flow that
//! drives a loaded roll from question to result.

pub mod config;
pub mod error;
pub mod question;
pub mod session;
pub mod store;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use question::Question;
pub use session::{DemoSession, Screen};
pub use store::{SessionStore, StoredRoll};
