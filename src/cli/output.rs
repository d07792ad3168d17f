//! Terminal output for the commands.
//!
//! Progress and results go to stdout; errors and warnings go to stderr so
//! scripts can capture one without the other.

use comfy_table::{Cell, Color, ContentArrangement, Table};
use console::style;

/// Kind of message, which fixes its marker, colour and stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
    Tip,
}

impl Level {
    fn marker(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Error => "\u{2717}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
            Self::Tip => "\u{2192}",
        }
    }

    pub fn to_stderr(self) -> bool {
        matches!(self, Self::Error | Self::Warning)
    }
}

/// One styled output line, without the trailing newline.
pub fn format_line(level: Level, msg: &str) -> String {
    let marker = style(level.marker());
    let marker = if level.to_stderr() {
        marker.for_stderr()
    } else {
        marker
    };

    match level {
        Level::Success => format!("{} {msg}", marker.green().bold()),
        Level::Error => format!("{} {msg}", marker.red().bold()),
        Level::Warning => format!("{} {msg}", marker.yellow().bold()),
        Level::Info => format!("{} {msg}", marker.blue().bold()),
        Level::Tip => format!("{} {}", marker.dim(), style(msg).dim()),
    }
}

fn emit(level: Level, msg: &str) {
    let line = format_line(level, msg);
    if level.to_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn success(msg: &str) {
    emit(Level::Success, msg);
}

pub fn error(msg: &str) {
    emit(Level::Error, msg);
}

pub fn warning(msg: &str) {
    emit(Level::Warning, msg);
}

pub fn info(msg: &str) {
    emit(Level::Info, msg);
}

pub fn tip(msg: &str) {
    emit(Level::Tip, msg);
}

/// Table of managed secret names and whether each exists remotely.
pub fn secret_status_table(expected: &[&str], found: &[String]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Secret", "Status"]);

    for &name in expected {
        let status = if found.iter().any(|f| f == name) {
            Cell::new("present").fg(Color::Green)
        } else {
            Cell::new("missing").fg(Color::Yellow)
        };
        table.add_row(vec![Cell::new(name), status]);
    }

    table
}

pub fn print_secret_status_table(expected: &[&str], found: &[String]) {
    println!("{}", secret_status_table(expected, found));
}
