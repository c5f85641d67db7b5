//! CLI command handlers.
//!
//! Each subcommand has its own module with a thin handler over the library
//! modules.
//!
//! # Commands
//!
//! - [`serve`] - Bind the HTTP JSON API
//! - [`show`] - Render a dashboard snapshot in the terminal
//! - [`check`] - Toggle a sub-task by ID
//! - [`delete`] - Delete an entity by ID, with confirmation

mod check;
mod delete;
mod serve;
mod show;

pub use check::check_command;
pub use delete::{delete_command, DeleteTarget};
pub use serve::serve_command;
pub use show::show_command;

use crate::config::Config;
use crate::document::Project;
use crate::store::Store;
use std::path::PathBuf;

/// Resolve the store from CLI override, config file, or the built-in
/// default directory, in that order.
pub fn resolve_store(config: &Config, data_dir_flag: Option<PathBuf>) -> Store {
    match data_dir_flag.or_else(|| config.data_dir.clone()) {
        Some(dir) => Store::with_dir(dir),
        None => Store::new(),
    }
}

/// Locate the category owning a goal item within a project.
fn find_item(project: &Project, item_id: &str) -> Option<String> {
    project
        .categories
        .iter()
        .find(|c| c.items.iter().any(|i| i.id == item_id))
        .map(|c| c.id.clone())
}

/// Locate the category and item owning a sub-task within a project.
fn find_sub(project: &Project, sub_id: &str) -> Option<(String, String)> {
    for category in &project.categories {
        for item in &category.items {
            if item.sub_items.iter().any(|s| s.id == sub_id) {
                return Some((category.id.clone(), item.id.clone()));
            }
        }
    }
    None
}
