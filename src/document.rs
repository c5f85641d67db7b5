//! The document tree persisted by the store.
//!
//! One `Document` holds every project; projects own their D-Day targets and
//! a hierarchical checklist (categories → goal items → sub-tasks). The wire
//! field names are camelCase to stay compatible with the persisted JSON
//! schema, and every nested sequence defaults to empty so a file with
//! missing fields still loads.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Root of the persisted state. Always written and read whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "currentProjectId")]
    pub current_project_id: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub theme: String,
    #[serde(rename = "dDayConfig", default)]
    pub d_day_config: Vec<DDay>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// One countdown target within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DDay {
    pub id: String,
    pub label: String,
    /// ISO timestamp, e.g. `2026-04-04T09:00:00`.
    pub date: String,
    /// Symbolic color token understood by the presentation layer.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub items: Vec<GoalItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalItem {
    pub id: String,
    pub label: String,
    /// ISO date (`YYYY-MM-DD`). Empty or absent means no target.
    #[serde(rename = "targetDate", default)]
    pub target_date: Option<String>,
    #[serde(rename = "isExpanded", default)]
    pub is_expanded: bool,
    #[serde(rename = "subItems", default)]
    pub sub_items: Vec<SubItem>,
}

/// Leaf unit of completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub checked: bool,
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate an opaque, timestamp-derived ID unique within this process.
///
/// The counter suffix keeps IDs distinct when several entities are created
/// within the same millisecond.
pub fn new_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let n = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{millis}-{n}")
}

impl Document {
    /// The project referenced by `currentProjectId`, falling back to the
    /// first project when the reference is stale.
    pub fn active_project(&self) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == self.current_project_id)
            .or_else(|| self.projects.first())
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}

impl Project {
    /// A fresh project the way the "add project" action creates one: a
    /// single target date 30 days out and one empty starter category.
    pub fn new(title: &str) -> Self {
        let d_day = DDay {
            id: new_id("d"),
            label: "Target date".to_string(),
            date: (Utc::now() + chrono::Duration::days(30))
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            color: "--neon-cyan".to_string(),
        };
        Self {
            id: new_id("p"),
            title: title.to_string(),
            subtitle: "D-DAY DASHBOARD".to_string(),
            theme: "neon-blue".to_string(),
            d_day_config: vec![d_day],
            categories: vec![Category {
                id: new_id("c"),
                label: "General".to_string(),
                items: Vec::new(),
            }],
        }
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

impl GoalItem {
    /// A fresh goal item the way the edit UI creates one: expanded, no
    /// target date, no sub-tasks yet.
    pub fn new(label: &str) -> Self {
        Self {
            id: new_id("g"),
            label: label.to_string(),
            target_date: None,
            is_expanded: true,
            sub_items: Vec::new(),
        }
    }

    /// The parsed target date, treating an empty string as unset.
    pub fn parsed_target_date(&self) -> Option<chrono::NaiveDate> {
        let raw = self.target_date.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

impl SubItem {
    pub fn new(label: &str) -> Self {
        Self {
            id: new_id("s"),
            label: label.to_string(),
            checked: false,
        }
    }
}

/// The built-in document served when nothing has been persisted yet.
pub fn default_document() -> Document {
    Document {
        current_project_id: "p1".to_string(),
        projects: vec![Project {
            id: "p1".to_string(),
            title: "2026 BIG DATA ANALYST".to_string(),
            subtitle: "D-DAY DASHBOARD".to_string(),
            theme: "neon-blue".to_string(),
            d_day_config: vec![
                DDay {
                    id: "d1".to_string(),
                    label: "Written exam".to_string(),
                    date: "2026-04-04T09:00:00".to_string(),
                    color: "--neon-cyan".to_string(),
                },
                DDay {
                    id: "d2".to_string(),
                    label: "Practical exam".to_string(),
                    date: "2026-06-20T09:00:00".to_string(),
                    color: "--neon-pink".to_string(),
                },
            ],
            categories: vec![Category {
                id: "c1".to_string(),
                label: "Written".to_string(),
                items: vec![GoalItem {
                    id: "w1".to_string(),
                    label: "Unit 1: Analysis planning".to_string(),
                    target_date: Some("2026-01-31".to_string()),
                    is_expanded: true,
                    sub_items: vec![
                        SubItem {
                            id: "w1-1".to_string(),
                            label: "Understanding big data".to_string(),
                            checked: false,
                        },
                        SubItem {
                            id: "w1-2".to_string(),
                            label: "Data governance".to_string(),
                            checked: false,
                        },
                    ],
                }],
            }],
        }],
    }
}
