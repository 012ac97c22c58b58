pub mod config;
pub mod confirm;
pub mod nearby;
pub mod repl;
pub mod say;
