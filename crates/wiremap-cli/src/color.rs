//! Terminal colorization for text output
//!
//! Applies ANSI styling to the draw hierarchy and list table using
//! crossterm. Colorization is decided once per invocation from the
//! `--color` choice, the `NO_COLOR` convention, and whether stdout is a
//! terminal.

use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;

/// When to colorize output
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if stdout is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Resolve a color choice against the environment
pub fn should_colorize(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            if std::env::var("NO_COLOR").is_ok() {
                return false;
            }
            std::io::stdout().is_tty()
        }
    }
}

/// Colorize the draw hierarchy
///
/// Module headers become cyan, receiver annotations green, producer
/// annotations yellow. Content is otherwise untouched.
pub fn colorize_draw(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        if line.starts_with('[') && line.ends_with(']') {
            result.push_str(&format!("{}", line.with(Color::Cyan)));
        } else if let Some(rest) = line.strip_prefix("  -> (IN)") {
            result.push_str(&format!("  -> {}{}", "(IN)".with(Color::Green), rest));
        } else if let Some(rest) = line.strip_prefix("  <- (OUT)") {
            result.push_str(&format!("  <- {}{}", "(OUT)".with(Color::Yellow), rest));
        } else {
            result.push_str(line);
        }
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Colorize the list table: the header line and rules are dimmed
pub fn colorize_list(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        if line.starts_with("Module:") {
            result.push_str(&format!("{}", line.with(Color::Cyan)));
        } else if line.chars().all(|c| c == '-') && !line.is_empty() {
            result.push_str(&format!("{}", line.dim()));
        } else {
            result.push_str(line);
        }
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}
