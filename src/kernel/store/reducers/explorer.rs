use crate::kernel::store::{DispatchResult, Store};
use crate::kernel::{Action, Effect};

impl Store {
    pub(in crate::kernel::store) fn reduce_explorer_action(
        &mut self,
        action: Action,
    ) -> DispatchResult {
        let explorer = &mut self.state.explorer;
        let state_changed = match action {
            Action::ToggleFolder { folder_id } => explorer.toggle(&folder_id),
            Action::RevealFile {
                ancestor_folder_ids,
            } => explorer.reveal(ancestor_folder_ids),
            Action::SetExpandedFromOpens { opens } => explorer.set_from_opens(&opens),
            _ => unreachable!("non-explorer action passed to reduce_explorer_action"),
        };

        DispatchResult {
            effects: if state_changed {
                vec![Effect::PersistExpandedFolders {
                    opens: explorer.opens_object(),
                }]
            } else {
                Vec::new()
            },
            state_changed,
        }
    }
}
