//! Terminal rendering helpers for the dashboard.

use crate::countdown::{Countdown, Urgency};
use terminal_size::{terminal_size, Width};

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";
pub const RED: &str = "\x1b[31m";
pub const GRAY: &str = "\x1b[90m";

const DEFAULT_TERMINAL_WIDTH: usize = 80;

pub fn get_terminal_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// Map a stored symbolic color token to the closest ANSI color.
pub fn token_color(token: &str) -> &'static str {
    match token {
        "--neon-cyan" => CYAN,
        "--neon-pink" => MAGENTA,
        "--neon-green" => GREEN,
        "--neon-purple" => BLUE,
        "--neon-yellow" => YELLOW,
        _ => CYAN,
    }
}

pub fn urgency_color(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Critical => RED,
        Urgency::Warning => YELLOW,
        Urgency::Neutral => CYAN,
        Urgency::Passed => GRAY,
    }
}

/// Render a fixed-width progress bar for a 0..=100 percentage.
pub fn make_progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent as usize * width) / 100;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// One countdown line, e.g. `Written exam    23d 04:05:06`.
pub fn format_countdown(countdown: Countdown) -> String {
    match countdown {
        Countdown::Remaining {
            days,
            hours,
            minutes,
            seconds,
        } => format!("{days}d {hours:02}:{minutes:02}:{seconds:02}"),
        Countdown::Reached => "target reached".to_string(),
    }
}

pub fn print_error(message: &str) {
    eprintln!("{RED}{BOLD}error:{RESET} {message}");
}

pub fn print_saved() {
    println!("{GREEN}saved{RESET}");
}
