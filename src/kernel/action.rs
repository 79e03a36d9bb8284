use super::state::{ContextMenu, OpensObject};

#[derive(Debug, Clone)]
pub enum Action {
    OpenTab {
        file_id: String,
    },
    OpenPreviewTab {
        file_id: String,
    },
    PinTab {
        file_id: String,
    },
    CloseTab {
        file_id: String,
    },
    ActivateTab {
        file_id: String,
    },
    ToggleFolder {
        folder_id: String,
    },
    RevealFile {
        ancestor_folder_ids: Vec<String>,
    },
    SetExpandedFromOpens {
        opens: OpensObject,
    },
    SetDraftContent {
        file_id: String,
        content: String,
    },
    ClearDraftContent {
        file_id: String,
    },
    SetFileMetadata {
        file_id: String,
        metadata: serde_json::Value,
    },
    SetDraftMetadata {
        file_id: String,
        metadata: serde_json::Value,
    },
    ClearDraftMetadata {
        file_id: String,
    },
    SetContextMenu(Option<ContextMenu>),
    RequestEditorAutoFocus {
        file_id: String,
    },
    ClearEditorAutoFocus {
        file_id: String,
    },
    Reset,
}
