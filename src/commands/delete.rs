//! Delete command handler.
//!
//! All deletions require a confirmation step (or `--yes`). Deleting the
//! last remaining project is rejected outright with no state change.

use super::{find_item, find_sub};
use crate::editor::EditSession;
use crate::error::{DdashError, Result};
use crate::output::print_saved;
use crate::prompt::confirm;
use crate::store::Store;

/// What kind of entity a `delete` invocation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Project,
    Category,
    Item,
    Sub,
    DDay,
}

impl DeleteTarget {
    fn noun(self) -> &'static str {
        match self {
            DeleteTarget::Project => "project",
            DeleteTarget::Category => "category",
            DeleteTarget::Item => "goal item",
            DeleteTarget::Sub => "sub-task",
            DeleteTarget::DDay => "D-Day",
        }
    }
}

/// Delete one entity by ID from the active project (or a whole project)
/// and autosave. `assume_yes` skips the interactive confirmation.
pub fn delete_command(
    store: Store,
    target: DeleteTarget,
    id: &str,
    assume_yes: bool,
) -> Result<()> {
    let mut session = EditSession::load(store);

    let question = format!(
        "Really delete {} '{id}'? This cannot be undone.",
        target.noun()
    );
    if !assume_yes && !confirm(&question, false) {
        println!("Cancelled.");
        return Ok(());
    }

    let project_id = {
        let doc = session.document();
        let project = doc
            .active_project()
            .ok_or_else(|| DdashError::ProjectNotFound(doc.current_project_id.clone()))?;
        project.id.clone()
    };

    match target {
        DeleteTarget::Project => session.delete_project(id)?,
        DeleteTarget::Category => session.delete_category(&project_id, id)?,
        DeleteTarget::DDay => session.delete_dday(&project_id, id)?,
        DeleteTarget::Item => {
            let category_id = {
                let project = session.document().project(&project_id);
                project
                    .and_then(|p| find_item(p, id))
                    .ok_or_else(|| DdashError::ItemNotFound(id.to_string()))?
            };
            session.delete_goal_item(&project_id, &category_id, id)?;
        }
        DeleteTarget::Sub => {
            let (category_id, item_id) = {
                let project = session.document().project(&project_id);
                project
                    .and_then(|p| find_sub(p, id))
                    .ok_or_else(|| DdashError::SubItemNotFound(id.to_string()))?
            };
            session.delete_sub_item(&project_id, &category_id, &item_id, id)?;
        }
    }

    print_saved();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> Store {
        Store::with_dir(dir.path().to_path_buf())
    }

    #[test]
    fn test_delete_sub_task_by_id() {
        let dir = TempDir::new().unwrap();
        delete_command(store_in(&dir), DeleteTarget::Sub, "w1-2", true).unwrap();

        let doc = store_in(&dir).read();
        let subs = &doc.projects[0].categories[0].items[0].sub_items;
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].id, "w1-1");
    }

    #[test]
    fn test_delete_goal_item_by_id() {
        let dir = TempDir::new().unwrap();
        delete_command(store_in(&dir), DeleteTarget::Item, "w1", true).unwrap();

        let doc = store_in(&dir).read();
        assert!(doc.projects[0].categories[0].items.is_empty());
    }

    #[test]
    fn test_delete_last_project_rejected_and_nothing_written() {
        let dir = TempDir::new().unwrap();
        let err = delete_command(store_in(&dir), DeleteTarget::Project, "p1", true).unwrap_err();
        assert!(matches!(err, DdashError::LastProject));
        assert!(!store_in(&dir).data_file().exists());
    }

    #[test]
    fn test_delete_dday_by_id() {
        let dir = TempDir::new().unwrap();
        delete_command(store_in(&dir), DeleteTarget::DDay, "d2", true).unwrap();

        let doc = store_in(&dir).read();
        assert_eq!(doc.projects[0].d_day_config.len(), 1);
        assert_eq!(doc.projects[0].d_day_config[0].id, "d1");
    }

    #[test]
    fn test_delete_unknown_target_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            delete_command(store_in(&dir), DeleteTarget::Category, "nope", true).unwrap_err(),
            DdashError::CategoryNotFound(_)
        ));
    }
}
