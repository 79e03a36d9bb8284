use crate::kernel::store::{DispatchResult, Store};
use crate::kernel::Action;

impl Store {
    pub(in crate::kernel::store) fn reduce_tabs_action(&mut self, action: Action) -> DispatchResult {
        let tabs = &mut self.state.tabs;
        let state_changed = match action {
            Action::OpenTab { file_id } => tabs.open(&file_id),
            Action::OpenPreviewTab { file_id } => tabs.open_preview(&file_id),
            Action::PinTab { file_id } => tabs.pin(&file_id),
            Action::CloseTab { file_id } => tabs.close(&file_id),
            Action::ActivateTab { file_id } => tabs.activate(&file_id),
            _ => unreachable!("non-tab action passed to reduce_tabs_action"),
        };
        DispatchResult::changed(state_changed)
    }
}
