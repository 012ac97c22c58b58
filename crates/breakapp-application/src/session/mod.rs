//! Session application services.
//!
//! `SessionStore` wraps the session repository with per-session locking and
//! lazy TTL expiry.

mod store;

pub use store::{SessionLease, SessionStore};
