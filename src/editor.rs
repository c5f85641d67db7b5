//! Document edit operations and the autosave session.
//!
//! Every mutation follows one shape: derive a new `Document` value from the
//! current one (never in-place field mutation), then commit it. The
//! [`EditSession`] owns the in-memory document and pushes the entire new
//! document to the store per the autosave policy of the edit: structural
//! edits and toggles save immediately, free-text edits are held until
//! [`EditSession::flush`] (the focus-loss moment) to avoid a write per
//! keystroke.

use crate::document::{Category, DDay, Document, GoalItem, Project, SubItem};
use crate::error::{DdashError, Result};
use crate::store::Store;
use tracing::warn;

/// When a committed edit reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autosave {
    Immediate,
    /// Deferred until the next `flush`.
    OnBlur,
}

// ============================================================================
// Pure operations: Document -> Document
// ============================================================================

fn with_project<F>(doc: &Document, project_id: &str, f: F) -> Result<Document>
where
    F: FnOnce(&mut Project) -> Result<()>,
{
    let mut next = doc.clone();
    let project = next
        .projects
        .iter_mut()
        .find(|p| p.id == project_id)
        .ok_or_else(|| DdashError::ProjectNotFound(project_id.to_string()))?;
    f(project)?;
    Ok(next)
}

fn with_category<F>(doc: &Document, project_id: &str, category_id: &str, f: F) -> Result<Document>
where
    F: FnOnce(&mut Category) -> Result<()>,
{
    with_project(doc, project_id, |project| {
        let category = project
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| DdashError::CategoryNotFound(category_id.to_string()))?;
        f(category)
    })
}

fn with_item<F>(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    item_id: &str,
    f: F,
) -> Result<Document>
where
    F: FnOnce(&mut GoalItem) -> Result<()>,
{
    with_category(doc, project_id, category_id, |category| {
        let item = category
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| DdashError::ItemNotFound(item_id.to_string()))?;
        f(item)
    })
}

pub fn select_project(doc: &Document, project_id: &str) -> Result<Document> {
    if doc.project(project_id).is_none() {
        return Err(DdashError::ProjectNotFound(project_id.to_string()));
    }
    let mut next = doc.clone();
    next.current_project_id = project_id.to_string();
    Ok(next)
}

/// Add a project and make it current. Returns the new document and the
/// generated project ID.
pub fn add_project(doc: &Document, title: &str) -> (Document, String) {
    let project = Project::new(title);
    let id = project.id.clone();
    let mut next = doc.clone();
    next.projects.push(project);
    next.current_project_id = id.clone();
    (next, id)
}

/// Delete a project. Deleting the last remaining project is rejected
/// outright; deleting the current project retargets to the first survivor.
pub fn delete_project(doc: &Document, project_id: &str) -> Result<Document> {
    if doc.project(project_id).is_none() {
        return Err(DdashError::ProjectNotFound(project_id.to_string()));
    }
    if doc.projects.len() == 1 {
        return Err(DdashError::LastProject);
    }
    let mut next = doc.clone();
    next.projects.retain(|p| p.id != project_id);
    if next.current_project_id == project_id {
        next.current_project_id = next.projects[0].id.clone();
    }
    Ok(next)
}

pub fn set_project_title(doc: &Document, project_id: &str, title: &str) -> Result<Document> {
    with_project(doc, project_id, |p| {
        p.title = title.to_string();
        Ok(())
    })
}

pub fn set_project_subtitle(doc: &Document, project_id: &str, subtitle: &str) -> Result<Document> {
    with_project(doc, project_id, |p| {
        p.subtitle = subtitle.to_string();
        Ok(())
    })
}

pub fn add_dday(
    doc: &Document,
    project_id: &str,
    label: &str,
    date: &str,
    color: &str,
) -> Result<Document> {
    with_project(doc, project_id, |p| {
        p.d_day_config.push(DDay {
            id: crate::document::new_id("d"),
            label: label.to_string(),
            date: date.to_string(),
            color: color.to_string(),
        });
        Ok(())
    })
}

pub fn delete_dday(doc: &Document, project_id: &str, dday_id: &str) -> Result<Document> {
    with_project(doc, project_id, |p| {
        let before = p.d_day_config.len();
        p.d_day_config.retain(|d| d.id != dday_id);
        if p.d_day_config.len() == before {
            return Err(DdashError::DDayNotFound(dday_id.to_string()));
        }
        Ok(())
    })
}

pub fn add_category(doc: &Document, project_id: &str, label: &str) -> Result<Document> {
    with_project(doc, project_id, |p| {
        p.categories.push(Category {
            id: crate::document::new_id("c"),
            label: label.to_string(),
            items: Vec::new(),
        });
        Ok(())
    })
}

pub fn rename_category(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    label: &str,
) -> Result<Document> {
    with_category(doc, project_id, category_id, |c| {
        c.label = label.to_string();
        Ok(())
    })
}

pub fn delete_category(doc: &Document, project_id: &str, category_id: &str) -> Result<Document> {
    with_project(doc, project_id, |p| {
        let before = p.categories.len();
        p.categories.retain(|c| c.id != category_id);
        if p.categories.len() == before {
            return Err(DdashError::CategoryNotFound(category_id.to_string()));
        }
        Ok(())
    })
}

pub fn add_goal_item(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    label: &str,
) -> Result<Document> {
    with_category(doc, project_id, category_id, |c| {
        c.items.push(GoalItem::new(label));
        Ok(())
    })
}

pub fn delete_goal_item(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    item_id: &str,
) -> Result<Document> {
    with_category(doc, project_id, category_id, |c| {
        let before = c.items.len();
        c.items.retain(|i| i.id != item_id);
        if c.items.len() == before {
            return Err(DdashError::ItemNotFound(item_id.to_string()));
        }
        Ok(())
    })
}

pub fn set_goal_label(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    item_id: &str,
    label: &str,
) -> Result<Document> {
    with_item(doc, project_id, category_id, item_id, |i| {
        i.label = label.to_string();
        Ok(())
    })
}

/// Set or clear a goal item's target date (`YYYY-MM-DD`).
pub fn set_target_date(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    item_id: &str,
    target_date: Option<&str>,
) -> Result<Document> {
    with_item(doc, project_id, category_id, item_id, |i| {
        i.target_date = target_date.map(str::to_string);
        Ok(())
    })
}

pub fn toggle_expand(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    item_id: &str,
) -> Result<Document> {
    with_item(doc, project_id, category_id, item_id, |i| {
        i.is_expanded = !i.is_expanded;
        Ok(())
    })
}

/// Add a sub-task; the parent item is force-expanded so the new entry is
/// visible.
pub fn add_sub_item(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    item_id: &str,
    label: &str,
) -> Result<Document> {
    with_item(doc, project_id, category_id, item_id, |i| {
        i.is_expanded = true;
        i.sub_items.push(SubItem::new(label));
        Ok(())
    })
}

pub fn delete_sub_item(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    item_id: &str,
    sub_id: &str,
) -> Result<Document> {
    with_item(doc, project_id, category_id, item_id, |i| {
        let before = i.sub_items.len();
        i.sub_items.retain(|s| s.id != sub_id);
        if i.sub_items.len() == before {
            return Err(DdashError::SubItemNotFound(sub_id.to_string()));
        }
        Ok(())
    })
}

pub fn set_sub_label(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    item_id: &str,
    sub_id: &str,
    label: &str,
) -> Result<Document> {
    with_item(doc, project_id, category_id, item_id, |i| {
        let sub = i
            .sub_items
            .iter_mut()
            .find(|s| s.id == sub_id)
            .ok_or_else(|| DdashError::SubItemNotFound(sub_id.to_string()))?;
        sub.label = label.to_string();
        Ok(())
    })
}

pub fn toggle_sub_item(
    doc: &Document,
    project_id: &str,
    category_id: &str,
    item_id: &str,
    sub_id: &str,
) -> Result<Document> {
    with_item(doc, project_id, category_id, item_id, |i| {
        let sub = i
            .sub_items
            .iter_mut()
            .find(|s| s.id == sub_id)
            .ok_or_else(|| DdashError::SubItemNotFound(sub_id.to_string()))?;
        sub.checked = !sub.checked;
        Ok(())
    })
}

// ============================================================================
// Edit session: in-memory document + store commit policy
// ============================================================================

/// Owns the in-memory document and applies edits with their autosave
/// policy. Write failures leave the in-memory document unchanged; nothing
/// else was mutated, so there is no rollback to perform.
pub struct EditSession {
    store: Store,
    doc: Document,
    dirty: bool,
}

impl EditSession {
    /// Load the current document, running the one-time legacy migration
    /// check first so an edit on a legacy-only install never overwrites
    /// the old checklist with defaults.
    pub fn load(store: Store) -> Self {
        if let Err(e) = store.migrate_legacy() {
            warn!(error = %e, "legacy checklist migration failed, continuing");
        }
        let doc = store.read();
        Self {
            store,
            doc,
            dirty: false,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Whether a deferred text edit is awaiting a flush.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn commit(&mut self, next: Document, autosave: Autosave) -> Result<()> {
        match autosave {
            Autosave::Immediate => {
                self.store.replace(&next)?;
                self.doc = next;
                self.dirty = false;
            }
            Autosave::OnBlur => {
                self.doc = next;
                self.dirty = true;
            }
        }
        Ok(())
    }

    /// Persist any deferred text edits (the focus-loss moment).
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.store.replace(&self.doc)?;
            self.dirty = false;
        }
        Ok(())
    }

    pub fn select_project(&mut self, project_id: &str) -> Result<()> {
        let next = select_project(&self.doc, project_id)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn add_project(&mut self, title: &str) -> Result<String> {
        let (next, id) = add_project(&self.doc, title);
        self.commit(next, Autosave::Immediate)?;
        Ok(id)
    }

    pub fn delete_project(&mut self, project_id: &str) -> Result<()> {
        let next = delete_project(&self.doc, project_id)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn set_project_title(&mut self, project_id: &str, title: &str) -> Result<()> {
        let next = set_project_title(&self.doc, project_id, title)?;
        self.commit(next, Autosave::OnBlur)
    }

    pub fn set_project_subtitle(&mut self, project_id: &str, subtitle: &str) -> Result<()> {
        let next = set_project_subtitle(&self.doc, project_id, subtitle)?;
        self.commit(next, Autosave::OnBlur)
    }

    pub fn add_dday(
        &mut self,
        project_id: &str,
        label: &str,
        date: &str,
        color: &str,
    ) -> Result<()> {
        let next = add_dday(&self.doc, project_id, label, date, color)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn delete_dday(&mut self, project_id: &str, dday_id: &str) -> Result<()> {
        let next = delete_dday(&self.doc, project_id, dday_id)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn add_category(&mut self, project_id: &str, label: &str) -> Result<()> {
        let next = add_category(&self.doc, project_id, label)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn rename_category(
        &mut self,
        project_id: &str,
        category_id: &str,
        label: &str,
    ) -> Result<()> {
        let next = rename_category(&self.doc, project_id, category_id, label)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn delete_category(&mut self, project_id: &str, category_id: &str) -> Result<()> {
        let next = delete_category(&self.doc, project_id, category_id)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn add_goal_item(
        &mut self,
        project_id: &str,
        category_id: &str,
        label: &str,
    ) -> Result<()> {
        let next = add_goal_item(&self.doc, project_id, category_id, label)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn delete_goal_item(
        &mut self,
        project_id: &str,
        category_id: &str,
        item_id: &str,
    ) -> Result<()> {
        let next = delete_goal_item(&self.doc, project_id, category_id, item_id)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn set_goal_label(
        &mut self,
        project_id: &str,
        category_id: &str,
        item_id: &str,
        label: &str,
    ) -> Result<()> {
        let next = set_goal_label(&self.doc, project_id, category_id, item_id, label)?;
        self.commit(next, Autosave::OnBlur)
    }

    pub fn set_target_date(
        &mut self,
        project_id: &str,
        category_id: &str,
        item_id: &str,
        target_date: Option<&str>,
    ) -> Result<()> {
        let next = set_target_date(&self.doc, project_id, category_id, item_id, target_date)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn toggle_expand(
        &mut self,
        project_id: &str,
        category_id: &str,
        item_id: &str,
    ) -> Result<()> {
        let next = toggle_expand(&self.doc, project_id, category_id, item_id)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn add_sub_item(
        &mut self,
        project_id: &str,
        category_id: &str,
        item_id: &str,
        label: &str,
    ) -> Result<()> {
        let next = add_sub_item(&self.doc, project_id, category_id, item_id, label)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn delete_sub_item(
        &mut self,
        project_id: &str,
        category_id: &str,
        item_id: &str,
        sub_id: &str,
    ) -> Result<()> {
        let next = delete_sub_item(&self.doc, project_id, category_id, item_id, sub_id)?;
        self.commit(next, Autosave::Immediate)
    }

    pub fn set_sub_label(
        &mut self,
        project_id: &str,
        category_id: &str,
        item_id: &str,
        sub_id: &str,
        label: &str,
    ) -> Result<()> {
        let next = set_sub_label(&self.doc, project_id, category_id, item_id, sub_id, label)?;
        self.commit(next, Autosave::OnBlur)
    }

    pub fn toggle_sub_item(
        &mut self,
        project_id: &str,
        category_id: &str,
        item_id: &str,
        sub_id: &str,
    ) -> Result<()> {
        let next = toggle_sub_item(&self.doc, project_id, category_id, item_id, sub_id)?;
        self.commit(next, Autosave::Immediate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::default_document;
    use tempfile::TempDir;

    fn session() -> (TempDir, EditSession) {
        let dir = TempDir::new().unwrap();
        let store = Store::with_dir(dir.path().to_path_buf());
        (dir, EditSession::load(store))
    }

    fn stored_doc(dir: &TempDir) -> Document {
        Store::with_dir(dir.path().to_path_buf()).read()
    }

    #[test]
    fn test_add_project_becomes_current_and_saves() {
        let (dir, mut session) = session();
        let id = session.add_project("Diet plan").unwrap();

        assert_eq!(session.document().current_project_id, id);
        let stored = stored_doc(&dir);
        assert_eq!(stored.projects.len(), 2);
        let added = stored.project(&id).unwrap();
        assert_eq!(added.title, "Diet plan");
        assert_eq!(added.d_day_config.len(), 1);
        assert_eq!(added.categories.len(), 1);
    }

    #[test]
    fn test_delete_last_project_rejected_without_write() {
        let (dir, mut session) = session();
        let err = session.delete_project("p1").unwrap_err();
        assert!(matches!(err, DdashError::LastProject));

        // Document unchanged in memory and nothing was written.
        assert_eq!(session.document(), &default_document());
        assert!(!Store::with_dir(dir.path().to_path_buf())
            .data_file()
            .exists());
    }

    #[test]
    fn test_delete_current_project_retargets_to_survivor() {
        let (_dir, mut session) = session();
        let id = session.add_project("Second").unwrap();
        session.delete_project(&id).unwrap();

        assert_eq!(session.document().current_project_id, "p1");
        assert_eq!(session.document().projects.len(), 1);
    }

    #[test]
    fn test_toggle_sub_item_saves_immediately() {
        let (dir, mut session) = session();
        session.toggle_sub_item("p1", "c1", "w1", "w1-1").unwrap();

        assert!(session.document().projects[0].categories[0].items[0].sub_items[0].checked);
        assert!(stored_doc(&dir).projects[0].categories[0].items[0].sub_items[0].checked);

        session.toggle_sub_item("p1", "c1", "w1", "w1-1").unwrap();
        assert!(!stored_doc(&dir).projects[0].categories[0].items[0].sub_items[0].checked);
    }

    #[test]
    fn test_text_edit_defers_save_until_flush() {
        let (dir, mut session) = session();
        session.set_goal_label("p1", "c1", "w1", "Renamed").unwrap();

        assert!(session.is_dirty());
        assert_eq!(session.document().projects[0].categories[0].items[0].label, "Renamed");
        // Nothing on disk yet.
        assert!(!Store::with_dir(dir.path().to_path_buf())
            .data_file()
            .exists());

        session.flush().unwrap();
        assert!(!session.is_dirty());
        assert_eq!(stored_doc(&dir).projects[0].categories[0].items[0].label, "Renamed");
    }

    #[test]
    fn test_add_sub_item_force_expands_parent() {
        let (_dir, mut session) = session();
        session.toggle_expand("p1", "c1", "w1").unwrap();
        assert!(!session.document().projects[0].categories[0].items[0].is_expanded);

        session.add_sub_item("p1", "c1", "w1", "New task").unwrap();
        let item = &session.document().projects[0].categories[0].items[0];
        assert!(item.is_expanded);
        assert_eq!(item.sub_items.len(), 3);
        assert!(!item.sub_items[2].checked);
    }

    #[test]
    fn test_add_and_delete_dday() {
        let (_dir, mut session) = session();
        session
            .add_dday("p1", "Mock exam", "2026-05-01T09:00:00", "--neon-green")
            .unwrap();
        assert_eq!(session.document().projects[0].d_day_config.len(), 3);

        session.delete_dday("p1", "d1").unwrap();
        assert_eq!(session.document().projects[0].d_day_config.len(), 2);

        let err = session.delete_dday("p1", "d1").unwrap_err();
        assert!(matches!(err, DdashError::DDayNotFound(_)));
    }

    #[test]
    fn test_delete_category_and_items() {
        let (_dir, mut session) = session();
        session.add_category("p1", "Practical").unwrap();
        assert_eq!(session.document().projects[0].categories.len(), 2);

        session.delete_goal_item("p1", "c1", "w1").unwrap();
        assert!(session.document().projects[0].categories[0].items.is_empty());

        session.delete_category("p1", "c1").unwrap();
        assert_eq!(session.document().projects[0].categories.len(), 1);
        assert_eq!(session.document().projects[0].categories[0].label, "Practical");
    }

    #[test]
    fn test_unknown_targets_are_errors() {
        let (_dir, mut session) = session();
        assert!(matches!(
            session.select_project("nope").unwrap_err(),
            DdashError::ProjectNotFound(_)
        ));
        assert!(matches!(
            session.add_goal_item("p1", "nope", "goal").unwrap_err(),
            DdashError::CategoryNotFound(_)
        ));
        assert!(matches!(
            session.toggle_sub_item("p1", "c1", "w1", "nope").unwrap_err(),
            DdashError::SubItemNotFound(_)
        ));
    }

    #[test]
    fn test_set_and_clear_target_date() {
        let (_dir, mut session) = session();
        session
            .set_target_date("p1", "c1", "w1", Some("2026-02-14"))
            .unwrap();
        assert_eq!(
            session.document().projects[0].categories[0].items[0]
                .target_date
                .as_deref(),
            Some("2026-02-14")
        );

        session.set_target_date("p1", "c1", "w1", None).unwrap();
        assert!(session.document().projects[0].categories[0].items[0]
            .target_date
            .is_none());
    }

    #[test]
    fn test_load_migrates_legacy_checklist_before_first_edit() {
        let dir = TempDir::new().unwrap();
        let legacy = r#"{
            "written": [
                { "id": "g1", "label": "Legacy goal", "isExpanded": true, "subItems": [] }
            ]
        }"#;
        std::fs::write(dir.path().join("checklist.json"), legacy).unwrap();

        let session = EditSession::load(Store::with_dir(dir.path().to_path_buf()));

        // The migrated checklist is what the session edits, not defaults.
        let items = &session.document().projects[0].categories[0].items;
        assert_eq!(items[0].label, "Legacy goal");
        assert!(!dir.path().join("checklist.json").exists());
    }

    #[test]
    fn test_ops_do_not_mutate_input_document() {
        let doc = default_document();
        let snapshot = doc.clone();
        let _ = toggle_sub_item(&doc, "p1", "c1", "w1", "w1-1").unwrap();
        let _ = delete_goal_item(&doc, "p1", "c1", "w1").unwrap();
        assert_eq!(doc, snapshot);
    }
}
