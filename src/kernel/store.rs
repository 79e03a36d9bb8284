use crate::models::AssetTree;

use super::{Action, ContextMenu, Effect, OpensObject, SessionState};

mod reducers;

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    pub(crate) fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }
}

/// Single-writer session container for one workspace editor view.
///
/// Every mutation goes through [`Store::dispatch`]; invalid requests (activating a
/// tab that is not open, closing an unknown tab, ...) are no-ops reported with
/// `state_changed == false` so hosts can skip redundant re-renders.
pub struct Store {
    state: SessionState,
    revision: u64,
}

impl Store {
    pub fn new(state: SessionState) -> Self {
        Self { state, revision: 0 }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Bumped once per state-changing dispatch.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        tracing::trace!(?action, "session dispatch");
        let result = match action {
            Action::OpenTab { .. }
            | Action::OpenPreviewTab { .. }
            | Action::PinTab { .. }
            | Action::CloseTab { .. }
            | Action::ActivateTab { .. } => self.reduce_tabs_action(action),
            Action::ToggleFolder { .. }
            | Action::RevealFile { .. }
            | Action::SetExpandedFromOpens { .. } => self.reduce_explorer_action(action),
            Action::SetDraftContent { .. }
            | Action::ClearDraftContent { .. }
            | Action::SetFileMetadata { .. }
            | Action::SetDraftMetadata { .. }
            | Action::ClearDraftMetadata { .. } => self.reduce_drafts_action(action),
            Action::SetContextMenu(_) => self.reduce_context_menu_action(action),
            Action::RequestEditorAutoFocus { file_id } => {
                let changed =
                    self.state.editor_auto_focus_file_id.as_deref() != Some(file_id.as_str());
                self.state.editor_auto_focus_file_id = Some(file_id);
                DispatchResult::changed(changed)
            }
            Action::ClearEditorAutoFocus { file_id } => {
                let matches =
                    self.state.editor_auto_focus_file_id.as_deref() == Some(file_id.as_str());
                if matches {
                    self.state.editor_auto_focus_file_id = None;
                }
                DispatchResult::changed(matches)
            }
            Action::Reset => {
                let was_empty = self.state.is_empty();
                // One assignment: readers never observe a half-cleared session.
                self.state = SessionState::default();
                DispatchResult::changed(!was_empty)
            }
        };

        if result.state_changed {
            self.revision = self.revision.wrapping_add(1);
        }
        result
    }

    pub fn open_tab(&mut self, file_id: impl Into<String>) -> DispatchResult {
        self.dispatch(Action::OpenTab {
            file_id: file_id.into(),
        })
    }

    pub fn open_preview_tab(&mut self, file_id: impl Into<String>) -> DispatchResult {
        self.dispatch(Action::OpenPreviewTab {
            file_id: file_id.into(),
        })
    }

    pub fn pin_tab(&mut self, file_id: impl Into<String>) -> DispatchResult {
        self.dispatch(Action::PinTab {
            file_id: file_id.into(),
        })
    }

    pub fn close_tab(&mut self, file_id: impl Into<String>) -> DispatchResult {
        self.dispatch(Action::CloseTab {
            file_id: file_id.into(),
        })
    }

    pub fn activate_tab(&mut self, file_id: impl Into<String>) -> DispatchResult {
        self.dispatch(Action::ActivateTab {
            file_id: file_id.into(),
        })
    }

    pub fn toggle_folder(&mut self, folder_id: impl Into<String>) -> DispatchResult {
        self.dispatch(Action::ToggleFolder {
            folder_id: folder_id.into(),
        })
    }

    pub fn reveal_file<I, S>(&mut self, ancestor_folder_ids: I) -> DispatchResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dispatch(Action::RevealFile {
            ancestor_folder_ids: ancestor_folder_ids.into_iter().map(Into::into).collect(),
        })
    }

    /// Expands every folder above `node_id` in `tree`. Unknown ids are ignored.
    pub fn reveal_node(&mut self, tree: &AssetTree, node_id: &str) -> DispatchResult {
        if !tree.contains(node_id) {
            return DispatchResult::changed(false);
        }
        self.reveal_file(tree.ancestor_folder_ids(node_id))
    }

    pub fn set_expanded_from_opens(&mut self, opens: OpensObject) -> DispatchResult {
        self.dispatch(Action::SetExpandedFromOpens { opens })
    }

    pub fn set_draft_content(
        &mut self,
        file_id: impl Into<String>,
        content: impl Into<String>,
    ) -> DispatchResult {
        self.dispatch(Action::SetDraftContent {
            file_id: file_id.into(),
            content: content.into(),
        })
    }

    pub fn clear_draft_content(&mut self, file_id: impl Into<String>) -> DispatchResult {
        self.dispatch(Action::ClearDraftContent {
            file_id: file_id.into(),
        })
    }

    pub fn set_file_metadata(
        &mut self,
        file_id: impl Into<String>,
        metadata: serde_json::Value,
    ) -> DispatchResult {
        self.dispatch(Action::SetFileMetadata {
            file_id: file_id.into(),
            metadata,
        })
    }

    pub fn set_draft_metadata(
        &mut self,
        file_id: impl Into<String>,
        metadata: serde_json::Value,
    ) -> DispatchResult {
        self.dispatch(Action::SetDraftMetadata {
            file_id: file_id.into(),
            metadata,
        })
    }

    pub fn clear_draft_metadata(&mut self, file_id: impl Into<String>) -> DispatchResult {
        self.dispatch(Action::ClearDraftMetadata {
            file_id: file_id.into(),
        })
    }

    pub fn set_context_menu(&mut self, menu: Option<ContextMenu>) -> DispatchResult {
        self.dispatch(Action::SetContextMenu(menu))
    }

    pub fn request_editor_auto_focus(&mut self, file_id: impl Into<String>) -> DispatchResult {
        self.dispatch(Action::RequestEditorAutoFocus {
            file_id: file_id.into(),
        })
    }

    pub fn clear_editor_auto_focus(&mut self, file_id: impl Into<String>) -> DispatchResult {
        self.dispatch(Action::ClearEditorAutoFocus {
            file_id: file_id.into(),
        })
    }

    pub fn reset(&mut self) -> DispatchResult {
        self.dispatch(Action::Reset)
    }

    // Selectors

    pub fn open_tab_ids(&self) -> &[String] {
        &self.state.tabs.open_tab_ids
    }

    pub fn active_tab_id(&self) -> Option<&str> {
        self.state.tabs.active_tab_id.as_deref()
    }

    pub fn preview_tab_id(&self) -> Option<&str> {
        self.state.tabs.preview_tab_id.as_deref()
    }

    pub fn expanded_folder_ids(&self) -> &rustc_hash::FxHashSet<String> {
        &self.state.explorer.expanded_folder_ids
    }

    pub fn is_expanded(&self, folder_id: &str) -> bool {
        self.state.explorer.is_expanded(folder_id)
    }

    pub fn get_opens_object(&self) -> OpensObject {
        self.state.explorer.opens_object()
    }

    pub fn is_dirty(&self, file_id: &str) -> bool {
        self.state.drafts.is_dirty(file_id)
    }

    pub fn get_draft_content(&self, file_id: &str) -> Option<&str> {
        self.state.drafts.content(file_id)
    }

    pub fn dirty_file_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .state
            .drafts
            .dirty_contents
            .keys()
            .map(String::as_str)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn is_metadata_dirty(&self, file_id: &str) -> bool {
        self.state.drafts.is_metadata_dirty(file_id)
    }

    pub fn get_metadata(&self, file_id: &str) -> Option<&serde_json::Value> {
        self.state.drafts.metadata(file_id)
    }

    pub fn has_unsaved_changes(&self, file_id: &str) -> bool {
        self.is_dirty(file_id) || self.is_metadata_dirty(file_id)
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.state.context_menu.menu.as_ref()
    }

    pub fn editor_auto_focus_file_id(&self) -> Option<&str> {
        self.state.editor_auto_focus_file_id.as_deref()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
