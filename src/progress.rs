//! Checklist completion percentages.
//!
//! Progress is computed purely from the ratio of checked to total sub-tasks
//! and is never persisted. An empty denominator is defined as 0%, never a
//! division error.

use crate::document::{Category, GoalItem};

fn percent(checked: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((checked as f64 / total as f64) * 100.0).round() as u8
}

/// Completion of a single goal item across its sub-tasks.
pub fn item_progress(item: &GoalItem) -> u8 {
    let checked = item.sub_items.iter().filter(|s| s.checked).count();
    percent(checked, item.sub_items.len())
}

/// Aggregate completion of a category across all sub-tasks of all items.
pub fn category_progress(category: &Category) -> u8 {
    let mut total = 0;
    let mut checked = 0;
    for item in &category.items {
        total += item.sub_items.len();
        checked += item.sub_items.iter().filter(|s| s.checked).count();
    }
    percent(checked, total)
}
