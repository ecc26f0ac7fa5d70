//! # Quotebook Architecture
//!
//! Quotebook is a **UI-agnostic quote catalog**: a local collection of quotes
//! grouped by category, persisted through a key-value store and kept loosely in
//! step with a remote collection. The CLI is one client of this library.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Installs logging, owns the tokio runtime                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the Catalog, session store and Synchronizer         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic per user action, returns CmdResult        │
//! │  - Turns network failures into warnings                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - catalog.rs: in-memory quotes, write-through to the store │
//! │  - reconcile.rs: pure local/remote merge                    │
//! │  - sync.rs: fetch, merge, persist, push cycles              │
//! │  - store/: KeyValueStore (FileStore, InMemoryStore)         │
//! │  - gateway/: RemoteGateway (HTTP, in-memory, offline)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Local Wins
//!
//! When the local catalog and the remote collection disagree about a quote id,
//! the local quote is kept. Remote quotes with unseen ids are appended. Every
//! write to the catalog goes to the store first and only then to memory, so a
//! failed write never leaves the two out of step.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`catalog`]: The quote collection and its persistence
//! - [`reconcile`]: Merge of local and remote collections
//! - [`sync`]: Reconciliation cycles and watch mode
//! - [`gateway`]: Remote collection access
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Quote`, `QuoteRecord`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod reconcile;
pub mod store;
pub mod sync;

#[cfg(test)]
pub mod test_utils;
