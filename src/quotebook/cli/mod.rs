//! # CLI
//!
//! The binary is intentionally thin: `main.rs` only starts the runtime, calls
//! [`run`] and turns an error into an exit code.
//!
//! - `commands`: context wiring and per-command handlers
//! - `print`: terminal output (colors, aligned quote lists)
//! - `setup`: argument parsing via clap

mod commands;
mod print;
pub mod setup;

pub use commands::run;
