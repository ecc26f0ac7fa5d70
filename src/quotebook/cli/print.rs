use chrono::{DateTime, Utc};
use colored::Colorize;
use quotebook::api::{CmdMessage, MessageLevel, StatusReport};
use quotebook::model::{Quote, ALL_CATEGORIES};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const CATEGORY_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Prints a single quote the way the catalog renders it.
pub(super) fn print_quote(quote: &Quote) {
    println!(
        "{} {}",
        format!("\"{}\"", quote.text).bold(),
        format!("- Category: {}", quote.category).dimmed()
    );
}

pub(super) fn print_quotes(quotes: &[Quote]) {
    if quotes.is_empty() {
        println!("No quotes found.");
        return;
    }

    let id_width = quotes
        .iter()
        .map(|q| q.id.to_string().width())
        .max()
        .unwrap_or(1);

    for quote in quotes {
        let id_str = format!("{:>width$}. ", quote.id, width = id_width);
        let category = truncate_to_width(&quote.category, CATEGORY_WIDTH);
        let category_cell = format!(
            "{}{}",
            category,
            " ".repeat(CATEGORY_WIDTH.saturating_sub(category.width()))
        );

        let fixed_width = id_str.width() + CATEGORY_WIDTH + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let text: String = quote
            .text
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let text_display = truncate_to_width(&text, available);
        let padding = available.saturating_sub(text_display.width());

        println!(
            "{}{}  {}{}{}",
            id_str.yellow(),
            category_cell.cyan(),
            text_display,
            " ".repeat(padding),
            format_time_ago(quote.timestamp).dimmed()
        );
    }
}

/// The selectable categories, with the "all" choice first.
pub(super) fn print_categories(categories: &[String], selected: Option<&str>) {
    let selected = selected.unwrap_or(ALL_CATEGORIES);
    for category in std::iter::once(ALL_CATEGORIES).chain(categories.iter().map(String::as_str)) {
        if category == selected {
            println!("{} {}", "*".green(), category.green());
        } else {
            println!("  {}", category);
        }
    }
}

pub(super) fn print_status(status: &StatusReport) {
    println!("{:<12}{}", "Quotes:", status.quote_count);
    println!("{:<12}{}", "Categories:", status.categories.len());
    println!(
        "{:<12}{}",
        "Filter:",
        status.selected_category.as_deref().unwrap_or(ALL_CATEGORIES)
    );
    let remote = if status.remote_configured {
        "configured".green()
    } else {
        "not configured".dimmed()
    };
    println!("{:<12}{}", "Remote:", remote);
    let last_sync = match status.last_sync {
        Some(at) => format_time_ago(at).trim().to_string(),
        None => "never".to_string(),
    };
    println!("{:<12}{}", "Last sync:", last_sync);
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
