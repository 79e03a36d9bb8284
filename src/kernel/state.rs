use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted expansion shape: folder id -> expanded flag.
pub type OpensObject = BTreeMap<String, bool>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabsState {
    pub open_tab_ids: Vec<String>,
    pub active_tab_id: Option<String>,
    pub preview_tab_id: Option<String>,
}

impl TabsState {
    pub fn is_open(&self, file_id: &str) -> bool {
        self.open_tab_ids.iter().any(|id| id == file_id)
    }

    fn index_of(&self, file_id: &str) -> Option<usize> {
        self.open_tab_ids.iter().position(|id| id == file_id)
    }

    fn set_active(&mut self, file_id: &str) -> bool {
        if self.active_tab_id.as_deref() == Some(file_id) {
            return false;
        }
        self.active_tab_id = Some(file_id.to_string());
        true
    }

    pub fn open(&mut self, file_id: &str) -> bool {
        if self.is_open(file_id) {
            return self.set_active(file_id);
        }
        self.open_tab_ids.push(file_id.to_string());
        self.active_tab_id = Some(file_id.to_string());
        true
    }

    /// Opens `file_id` in the single preview slot. An existing preview tab is
    /// replaced in place so the tab row does not grow while browsing.
    pub fn open_preview(&mut self, file_id: &str) -> bool {
        if self.is_open(file_id) {
            return self.set_active(file_id);
        }

        let slot = self
            .preview_tab_id
            .as_deref()
            .and_then(|preview| self.index_of(preview));
        match slot {
            Some(index) => self.open_tab_ids[index] = file_id.to_string(),
            None => self.open_tab_ids.push(file_id.to_string()),
        }
        self.preview_tab_id = Some(file_id.to_string());
        self.active_tab_id = Some(file_id.to_string());
        true
    }

    pub fn pin(&mut self, file_id: &str) -> bool {
        if self.preview_tab_id.as_deref() != Some(file_id) {
            return false;
        }
        self.preview_tab_id = None;
        true
    }

    pub fn close(&mut self, file_id: &str) -> bool {
        let Some(closed_index) = self.index_of(file_id) else {
            return false;
        };
        self.open_tab_ids.remove(closed_index);

        if self.preview_tab_id.as_deref() == Some(file_id) {
            self.preview_tab_id = None;
        }

        if self.active_tab_id.as_deref() == Some(file_id) {
            // The tab that shifted into the closed slot wins; the previous one
            // takes over when the last tab was closed.
            self.active_tab_id = match self.open_tab_ids.len() {
                0 => None,
                len => Some(self.open_tab_ids[closed_index.min(len - 1)].clone()),
            };
        }
        true
    }

    pub fn activate(&mut self, file_id: &str) -> bool {
        if !self.is_open(file_id) {
            return false;
        }
        self.set_active(file_id)
    }

    pub fn is_empty(&self) -> bool {
        self.open_tab_ids.is_empty() && self.active_tab_id.is_none() && self.preview_tab_id.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplorerState {
    pub expanded_folder_ids: FxHashSet<String>,
}

impl ExplorerState {
    pub fn is_expanded(&self, folder_id: &str) -> bool {
        self.expanded_folder_ids.contains(folder_id)
    }

    pub fn toggle(&mut self, folder_id: &str) -> bool {
        if !self.expanded_folder_ids.remove(folder_id) {
            self.expanded_folder_ids.insert(folder_id.to_string());
        }
        true
    }

    pub fn reveal<I, S>(&mut self, ancestor_folder_ids: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut changed = false;
        for id in ancestor_folder_ids {
            changed |= self.expanded_folder_ids.insert(id.into());
        }
        changed
    }

    /// Replaces the whole set. Stale ids are kept; they simply never match a
    /// rendered folder.
    pub fn set_from_opens(&mut self, opens: &OpensObject) -> bool {
        let next: FxHashSet<String> = opens
            .iter()
            .filter(|(_, open)| **open)
            .map(|(id, _)| id.clone())
            .collect();
        if next == self.expanded_folder_ids {
            return false;
        }
        self.expanded_folder_ids = next;
        true
    }

    pub fn opens_object(&self) -> OpensObject {
        self.expanded_folder_ids
            .iter()
            .map(|id| (id.clone(), true))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftsState {
    pub dirty_contents: FxHashMap<String, String>,
    pub file_metadata: FxHashMap<String, serde_json::Value>,
    pub draft_metadata: FxHashMap<String, serde_json::Value>,
}

impl DraftsState {
    pub fn set_content(&mut self, file_id: &str, content: String) -> bool {
        match self.dirty_contents.get_mut(file_id) {
            Some(existing) if *existing == content => false,
            Some(existing) => {
                *existing = content;
                true
            }
            None => {
                self.dirty_contents.insert(file_id.to_string(), content);
                true
            }
        }
    }

    pub fn clear_content(&mut self, file_id: &str) -> bool {
        self.dirty_contents.remove(file_id).is_some()
    }

    pub fn is_dirty(&self, file_id: &str) -> bool {
        self.dirty_contents.contains_key(file_id)
    }

    pub fn content(&self, file_id: &str) -> Option<&str> {
        self.dirty_contents.get(file_id).map(String::as_str)
    }

    pub fn set_saved_metadata(&mut self, file_id: &str, metadata: serde_json::Value) -> bool {
        if self.file_metadata.get(file_id) == Some(&metadata) {
            return false;
        }
        self.file_metadata.insert(file_id.to_string(), metadata);
        true
    }

    pub fn set_metadata_draft(&mut self, file_id: &str, metadata: serde_json::Value) -> bool {
        if self.draft_metadata.get(file_id) == Some(&metadata) {
            return false;
        }
        self.draft_metadata.insert(file_id.to_string(), metadata);
        true
    }

    pub fn clear_metadata_draft(&mut self, file_id: &str) -> bool {
        self.draft_metadata.remove(file_id).is_some()
    }

    pub fn is_metadata_dirty(&self, file_id: &str) -> bool {
        self.draft_metadata.contains_key(file_id)
    }

    /// Draft metadata shadows the saved copy.
    pub fn metadata(&self, file_id: &str) -> Option<&serde_json::Value> {
        self.draft_metadata
            .get(file_id)
            .or_else(|| self.file_metadata.get(file_id))
    }

    pub fn is_empty(&self) -> bool {
        self.dirty_contents.is_empty()
            && self.file_metadata.is_empty()
            && self.draft_metadata.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextMenu {
    pub top: f64,
    pub left: f64,
    pub node_id: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextMenuState {
    pub menu: Option<ContextMenu>,
}

impl ContextMenuState {
    pub fn set(&mut self, menu: Option<ContextMenu>) -> bool {
        if self.menu == menu {
            return false;
        }
        self.menu = menu;
        true
    }
}

/// Everything the editor view tracks for one workspace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub tabs: TabsState,
    pub explorer: ExplorerState,
    pub drafts: DraftsState,
    pub context_menu: ContextMenuState,
    pub editor_auto_focus_file_id: Option<String>,
}

impl SessionState {
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
            && self.explorer.expanded_folder_ids.is_empty()
            && self.drafts.is_empty()
            && self.context_menu.menu.is_none()
            && self.editor_auto_focus_file_id.is_none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
