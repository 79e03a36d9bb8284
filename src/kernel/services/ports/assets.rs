//! Contracts with the asset backend: tree reads and node creation.

use std::fmt;

use super::runtime::BoxFuture;
use crate::models::TreeNode;

pub type Result<T> = std::result::Result<T, AssetError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The request never produced a response.
    Transport(String),
    /// The backend answered with an error.
    Rejected { code: String, message: String },
    WorkspaceNotFound(String),
    ParentNotFound(String),
    ParentNotFolder(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Transport(e) => write!(f, "transport error: {}", e),
            AssetError::Rejected { code, message } => write!(f, "rejected ({}): {}", code, message),
            AssetError::WorkspaceNotFound(id) => write!(f, "workspace not found: {}", id),
            AssetError::ParentNotFound(id) => write!(f, "parent not found: {}", id),
            AssetError::ParentNotFolder(id) => write!(f, "parent is not a folder: {}", id),
        }
    }
}

impl std::error::Error for AssetError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFolderRequest {
    pub name: String,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFileRequest {
    pub name: String,
    pub parent_id: Option<String>,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedNode {
    pub id: String,
}

pub trait AssetTreeProvider: Send + Sync {
    fn get_tree<'a>(&'a self, workspace_id: &'a str) -> BoxFuture<'a, Result<Vec<TreeNode>>>;
}

/// Node creation. Whatever backs this trait is also the identifier source: the
/// returned [`CreatedNode::id`] is the only id the kernel ever sees.
pub trait AssetApi: Send + Sync {
    fn create_folder<'a>(
        &'a self,
        workspace_id: &'a str,
        request: CreateFolderRequest,
    ) -> BoxFuture<'a, Result<CreatedNode>>;

    fn create_file<'a>(
        &'a self,
        workspace_id: &'a str,
        request: CreateFileRequest,
    ) -> BoxFuture<'a, Result<CreatedNode>>;
}
