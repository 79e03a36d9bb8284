use crate::kernel::store::{DispatchResult, Store};
use crate::kernel::Action;

impl Store {
    pub(in crate::kernel::store) fn reduce_drafts_action(&mut self, action: Action) -> DispatchResult {
        let drafts = &mut self.state.drafts;
        let state_changed = match action {
            Action::SetDraftContent { file_id, content } => drafts.set_content(&file_id, content),
            Action::ClearDraftContent { file_id } => drafts.clear_content(&file_id),
            Action::SetFileMetadata { file_id, metadata } => {
                drafts.set_saved_metadata(&file_id, metadata)
            }
            Action::SetDraftMetadata { file_id, metadata } => {
                drafts.set_metadata_draft(&file_id, metadata)
            }
            Action::ClearDraftMetadata { file_id } => drafts.clear_metadata_draft(&file_id),
            _ => unreachable!("non-draft action passed to reduce_drafts_action"),
        };
        DispatchResult::changed(state_changed)
    }
}
