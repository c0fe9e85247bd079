//! Operator-facing messages. Everything but errors goes to stdout.

use ansi_term::{Colour, Style};
use std::fmt;
use std::io::{self, Write};

/// Width of the label column printed by [`field`].
const FIELD_WIDTH: usize = 16;

#[derive(Clone, Copy)]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn icon(self) -> &'static str {
        match self {
            Level::Info => "ℹ️",
            Level::Success => "✅",
            Level::Warning => "⚠️",
            Level::Error => "❌",
        }
    }

    fn style(self) -> Style {
        let colour = match self {
            Level::Info => Colour::Blue,
            Level::Success => Colour::Green,
            Level::Warning => Colour::Yellow,
            Level::Error => Colour::Red,
        };
        colour.bold()
    }
}

fn emit(level: Level, msg: impl fmt::Display) {
    let line = format!("{} {}", level.style().paint(level.icon()), msg);
    match level {
        Level::Error => eprintln!("{}", line),
        _ => println!("{}", line),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Level::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Level::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Level::Warning, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Level::Error, msg);
}

/// Section header for reports: `=== March 2025 ===`
pub fn header<T: fmt::Display>(msg: T) {
    println!("\n{}", Colour::Blue.bold().paint(format!("=== {} ===", msg)));
}

/// One `label : value` line of a report block.
pub fn field<T: fmt::Display>(label: &str, value: T) {
    println!("{:<width$}: {}", label, value, width = FIELD_WIDTH);
}

/// Ask a yes/no question; anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{} [y/N]: ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
