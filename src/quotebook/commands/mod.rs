//! # Command Layer
//!
//! The business logic behind each user action. Commands operate on the
//! [`Catalog`](crate::catalog::Catalog) and the gateway and return a structured
//! [`CmdResult`]; they never print, prompt, or exit.
//!
//! ## Error Policy
//!
//! Validation, format and store errors are returned as `Err` and abort the
//! command with no state change. Network errors never escape a command: local
//! work is kept and the failure becomes a warning message.
//!
//! ## Command Modules
//!
//! - [`add`]: add a quote, push it with `create`
//! - [`remove`]: remove a quote, push the `delete`
//! - [`show`]: pick a random quote
//! - [`list`]: list quotes, optionally by category
//! - [`categories`]: distinct categories
//! - [`filter`]: save the selected category and list its quotes
//! - [`import`]: import a JSON file
//! - [`export`]: export the catalog as JSON
//! - [`sync`]: run one reconciliation cycle
//! - [`status`]: counts, selection and last sync time

use crate::model::Quote;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod categories;
pub mod export;
pub mod filter;
pub mod import;
pub mod list;
pub mod remove;
pub mod show;
pub mod status;
pub mod sync;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Snapshot for the `status` command.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub quote_count: usize,
    pub categories: Vec<String>,
    pub selected_category: Option<String>,
    pub last_sync: Option<DateTime<Utc>>,
    pub remote_configured: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Quotes created, removed or imported by the command.
    pub affected_quotes: Vec<Quote>,
    /// Quotes to display.
    pub listed_quotes: Vec<Quote>,
    pub categories: Vec<String>,
    /// Exported JSON, when it is meant for the caller rather than a file.
    pub exported: Option<String>,
    pub output_path: Option<PathBuf>,
    pub status: Option<StatusReport>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_quotes(mut self, quotes: Vec<Quote>) -> Self {
        self.affected_quotes = quotes;
        self
    }

    pub fn with_listed_quotes(mut self, quotes: Vec<Quote>) -> Self {
        self.listed_quotes = quotes;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}

/// Generic notice for any failed remote interaction.
pub(crate) const SYNC_FAILED: &str = "Sync with server failed";
