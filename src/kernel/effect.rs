use super::state::OpensObject;

/// Work the host performs after a dispatch. The store itself never does I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PersistExpandedFolders { opens: OpensObject },
}
