//! File-backed document store.
//!
//! The store owns a single `data.json` under its data directory and exposes
//! exactly two operations: read the whole document and replace the whole
//! document. There is deliberately no read-modify-write API; callers send
//! the complete desired document on every write, so no field-level merge
//! logic exists to get wrong. Last writer wins.

use crate::document::{default_document, Document, GoalItem};
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

const DATA_DIR: &str = ".ddash";
const DATA_FILE: &str = "data.json";
const LEGACY_FILE: &str = "checklist.json";
const LEGACY_RETIRED_FILE: &str = "checklist.old.json";

/// Shape of the pre-projects checklist file: two flat item lists.
#[derive(Debug, Deserialize)]
struct LegacyChecklist {
    #[serde(default)]
    written: Option<Vec<GoalItem>>,
    #[serde(default)]
    practical: Option<Vec<GoalItem>>,
}

pub struct Store {
    base_dir: PathBuf,
}

impl Store {
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from(DATA_DIR),
        }
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        Self { base_dir: dir }
    }

    pub fn data_file(&self) -> PathBuf {
        self.base_dir.join(DATA_FILE)
    }

    fn legacy_file(&self) -> PathBuf {
        self.base_dir.join(LEGACY_FILE)
    }

    /// Read the persisted document. A missing or unreadable file degrades
    /// to the built-in default document rather than an error.
    pub fn read(&self) -> Document {
        let path = self.data_file();
        if !path.exists() {
            return default_document();
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "unreadable data file, serving defaults"
                    );
                    default_document()
                }
            },
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to read data file, serving defaults"
                );
                default_document()
            }
        }
    }

    /// Overwrite the persisted document with exactly the given value.
    pub fn replace(&self, doc: &Document) -> Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        let content = serde_json::to_string_pretty(doc)?;
        fs::write(self.data_file(), content)?;
        Ok(())
    }

    /// One-time startup migration of the legacy two-list checklist file.
    ///
    /// Runs only when `checklist.json` exists and `data.json` does not.
    /// The legacy lists become categories of one default project; the old
    /// file is renamed aside so the check never fires again. Best-effort:
    /// the caller logs failures and continues.
    pub fn migrate_legacy(&self) -> Result<bool> {
        let legacy = self.legacy_file();
        if !legacy.exists() || self.data_file().exists() {
            return Ok(false);
        }

        info!(path = %legacy.display(), "migrating legacy checklist file");
        let content = fs::read_to_string(&legacy)?;
        let old: LegacyChecklist = serde_json::from_str(&content)?;

        let mut doc = default_document();
        let project = &mut doc.projects[0];
        project.categories.clear();
        if let Some(items) = old.written {
            project.categories.push(crate::document::Category {
                id: "c1".to_string(),
                label: "Written".to_string(),
                items,
            });
        }
        if let Some(items) = old.practical {
            project.categories.push(crate::document::Category {
                id: "c2".to_string(),
                label: "Practical".to_string(),
                items,
            });
        }

        self.replace(&doc)?;
        fs::rename(&legacy, self.base_dir.join(LEGACY_RETIRED_FILE))?;
        Ok(true)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
