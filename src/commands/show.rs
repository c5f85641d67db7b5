//! Show command handler: render one dashboard snapshot in the terminal.

use crate::countdown::{classify, parse_dday_date, Countdown};
use crate::document::Document;
use crate::error::{DdashError, Result};
use crate::output::{
    format_countdown, get_terminal_width, make_progress_bar, token_color, urgency_color, BOLD,
    DIM, GRAY, RESET,
};
use crate::progress::{category_progress, item_progress};
use crate::quote::quote_for;
use crate::store::Store;
use chrono::{DateTime, Local, NaiveDate, Utc};
use std::fmt::Write as _;
use std::panic::{catch_unwind, AssertUnwindSafe, UnwindSafe};
use tracing::{error, warn};

pub fn show_command(store: &Store) -> Result<()> {
    if let Err(e) = store.migrate_legacy() {
        warn!(error = %e, "legacy checklist migration failed, continuing");
    }
    let doc = store.read();
    let now = Utc::now();
    let today = Local::now().date_naive();
    let width = get_terminal_width();

    let rendered =
        render_guarded(AssertUnwindSafe(|| render_dashboard(&doc, now, today, width)))?;
    print!("{rendered}");
    Ok(())
}

/// Fault barrier: a rendering bug degrades to a diagnostic error (and a
/// non-zero exit from `main`) instead of a raw panic taking the process
/// down.
fn render_guarded<F>(render: F) -> Result<String>
where
    F: FnOnce() -> String + UnwindSafe,
{
    catch_unwind(render).map_err(|_| {
        error!("dashboard rendering panicked");
        DdashError::RenderFailed
    })
}

/// Render the whole dashboard to a string: header, quote, countdowns,
/// then each category's checklist with badges and progress.
pub fn render_dashboard(
    doc: &Document,
    now: DateTime<Utc>,
    today: NaiveDate,
    width: usize,
) -> String {
    let mut out = String::new();
    // Progress bars shrink with the terminal but stay readable.
    let bar_width = (width / 3).clamp(10, 24);

    let Some(project) = doc.active_project() else {
        let _ = writeln!(out, "No projects found. The data file needs a reset.");
        return out;
    };

    let _ = writeln!(out);
    let _ = writeln!(out, "  {BOLD}{}{RESET}", project.title);
    let _ = writeln!(out, "  {GRAY}{}{RESET}", project.subtitle.to_uppercase());
    let _ = writeln!(out);
    let _ = writeln!(out, "  {DIM}\"{}\"{RESET}", quote_for(today));
    let _ = writeln!(out);

    if project.d_day_config.is_empty() {
        let _ = writeln!(out, "  {GRAY}No D-Day set.{RESET}");
    }
    for d_day in &project.d_day_config {
        let color = token_color(&d_day.color);
        match parse_dday_date(&d_day.date) {
            Some(target) => {
                let countdown = Countdown::until(target, now);
                let _ = writeln!(
                    out,
                    "  {color}{:<20}{RESET} {}",
                    d_day.label,
                    format_countdown(countdown)
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "  {color}{:<20}{RESET} {DIM}invalid date{RESET}",
                    d_day.label
                );
            }
        }
    }
    let _ = writeln!(out);

    for category in &project.categories {
        let pct = category_progress(category);
        let _ = writeln!(
            out,
            "  {BOLD}{}{RESET}  [{}] {pct:>3}%",
            category.label,
            make_progress_bar(pct, bar_width)
        );

        for item in &category.items {
            let badge = item.parsed_target_date().map(|target| classify(target, today));
            let badge_text = match &badge {
                Some(b) => format!(" {}[{}]{RESET}", urgency_color(b.urgency), b.label),
                None => String::new(),
            };
            let _ = writeln!(
                out,
                "    {} {}{badge_text} {DIM}{}%{RESET}",
                if item.is_expanded { "▾" } else { "▸" },
                item.label,
                item_progress(item)
            );
            if item.is_expanded {
                for sub in &item.sub_items {
                    let mark = if sub.checked { "x" } else { " " };
                    let style = if sub.checked { DIM } else { "" };
                    let _ = writeln!(out, "        [{mark}] {style}{}{RESET}", sub.label);
                }
            }
        }
        let _ = writeln!(out);
    }

    out
}
