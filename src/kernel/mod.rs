//! Headless session core (state/action/effect) for the skill asset editor.

pub mod action;
pub mod effect;
pub mod lifecycle;
pub mod services;
pub mod state;
pub mod store;
pub mod upload;

pub use action::Action;
pub use effect::Effect;
pub use lifecycle::SessionLifecycleController;
pub use state::{
    ContextMenu, ContextMenuState, DraftsState, ExplorerState, OpensObject, SessionState,
    TabsState,
};
pub use store::{DispatchResult, Store};
pub use upload::{
    plan_upload, FolderUploader, UploadError, UploadFile, UploadPlan, UploadReport,
};
