pub mod commands;
pub mod config;
pub mod countdown;
pub mod document;
pub mod editor;
pub mod error;
pub mod output;
pub mod progress;
pub mod prompt;
pub mod quote;
pub mod server;
pub mod store;

pub use config::Config;
pub use countdown::{classify, Countdown, DdayBadge, Urgency};
pub use document::{default_document, Category, DDay, Document, GoalItem, Project, SubItem};
pub use editor::{Autosave, EditSession};
pub use error::{DdashError, Result};
pub use store::Store;
