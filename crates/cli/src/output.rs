//! Terminal output: toasts, tables and detail lines.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use shopdesk_admin::notify::{Notifier, Toast, ToastLevel};

/// Prints toasts as they arrive and remembers whether any was an error.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    errors: usize,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of error toasts shown so far.
    pub const fn error_count(&self) -> usize {
        self.errors
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, toast: Toast) {
        tracing::debug!(level = ?toast.level, message = %toast.message, "toast");
        match toast.level {
            ToastLevel::Success => println!("ok: {}", toast.message),
            ToastLevel::Error => {
                self.errors += 1;
                eprintln!("error: {}", toast.message);
            }
        }
    }
}

/// Print rows under a header.
pub fn table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("(no results)");
        return;
    }
    println!("{}", build_table(headers, rows));
}

fn build_table(headers: &[&str], rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    for row in rows {
        table.add_row(row.iter().map(Cell::new));
    }
    table
}

/// Print `label: value` lines aligned on the colon.
pub fn details(pairs: &[(&str, String)]) {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in pairs {
        println!("{key:>width$}: {value}");
    }
}

/// Print a single line.
pub fn line(text: impl std::fmt::Display) {
    println!("{text}");
}

/// Render an optional value, with `-` for none.
pub fn opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Render a flag as `yes`/`no`.
pub fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}
