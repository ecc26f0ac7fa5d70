use crate::error::{QuoteError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation-only sentinel meaning "no category filter".
/// Never stored as the category of a quote.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Whether `category` is the "all" sentinel and so cannot label a quote.
pub fn is_reserved_category(category: &str) -> bool {
    category.trim() == ALL_CATEGORIES
}

/// A single quote. Two quotes are the same logical quote iff their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    pub text: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

impl Quote {
    pub fn new(id: i64, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            category: category.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The one-line rendering used for display and for the last-shown key.
    pub fn render(&self) -> String {
        format!("\"{}\" - Category: {}", self.text, self.category)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Lenient shape of a quote coming from outside: import files and the remote
/// collection. Extra fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl QuoteRecord {
    /// Names the fields that keep this record from being a quote, if any.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !is_present(&self.text) {
            missing.push("text");
        }
        if !is_present(&self.category) {
            missing.push("category");
        }
        missing
    }

    /// Converts into a quote, using `fallback_id` when the record has no id.
    /// Returns `None` when text or category is missing or blank.
    pub fn into_quote(self, fallback_id: impl FnOnce() -> i64) -> Option<Quote> {
        if !self.missing_fields().is_empty() {
            return None;
        }
        let id = self.id.unwrap_or_else(fallback_id);
        Some(Quote {
            id,
            text: self.text.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        })
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// Creation-time based id: milliseconds since the epoch, bumped past
/// `max_existing` so ids stay unique when several are minted in the same
/// millisecond. Fails once `max_existing` is `i64::MAX`.
pub fn next_id(max_existing: Option<i64>) -> Result<i64> {
    let now = Utc::now().timestamp_millis();
    match max_existing {
        Some(max) if max >= now => max.checked_add(1).ok_or_else(|| {
            QuoteError::Validation(format!("Cannot assign a new id after id {}", max))
        }),
        _ => Ok(now),
    }
}

const DEFAULT_QUOTES: &[(i64, &str, &str)] = &[
    (
        1,
        "The only way to do great work is to love what you do.",
        "Motivation",
    ),
    (
        2,
        "Life is what happens when you're busy making other plans.",
        "Life",
    ),
    (
        3,
        "Simplicity is prerequisite for reliability.",
        "Programming",
    ),
    (
        4,
        "In the middle of difficulty lies opportunity.",
        "Motivation",
    ),
];

/// The built-in set a fresh catalog starts from.
pub fn default_quotes() -> Vec<Quote> {
    DEFAULT_QUOTES
        .iter()
        .map(|(id, text, category)| Quote::new(*id, *text, *category))
        .collect()
}
