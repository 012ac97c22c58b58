//! Domain layer of the BreakApp conversational ordering engine.
//!
//! Holds the models, the shared error type, the collaborator traits and the
//! pure algorithms (geo matching, keyword intent classification, entity
//! extraction). Nothing here performs I/O.

pub mod config;
pub mod conversation;
pub mod error;
pub mod geo;
pub mod language;
pub mod menu;
pub mod nlp;
pub mod order;
pub mod preference;
pub mod speech;

pub use error::{BreakAppError, Result};
pub use language::Language;
