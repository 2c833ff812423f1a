//! Session management
//!
//! The authenticator exchanges credentials for an identity; the store holds
//! and persists it.

mod auth;
mod store;

pub use auth::{Authenticator, MISSING_CREDENTIALS};
pub use store::SessionStore;
