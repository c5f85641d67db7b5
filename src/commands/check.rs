//! Check command handler: toggle a sub-task by its ID.

use super::find_sub;
use crate::editor::EditSession;
use crate::error::{DdashError, Result};
use crate::output::print_saved;
use crate::store::Store;

/// Toggle one sub-task in the active project and autosave immediately,
/// mirroring a checkbox click.
pub fn check_command(store: Store, sub_id: &str) -> Result<()> {
    let mut session = EditSession::load(store);

    let (project_id, category_id, item_id) = {
        let doc = session.document();
        let project = doc
            .active_project()
            .ok_or_else(|| DdashError::ProjectNotFound(doc.current_project_id.clone()))?;
        let (category_id, item_id) = find_sub(project, sub_id)
            .ok_or_else(|| DdashError::SubItemNotFound(sub_id.to_string()))?;
        (project.id.clone(), category_id, item_id)
    };

    session.toggle_sub_item(&project_id, &category_id, &item_id, sub_id)?;
    print_saved();
    Ok(())
}
