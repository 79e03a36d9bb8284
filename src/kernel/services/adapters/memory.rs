//! In-process asset backend. Ids come from a per-service counter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;

use crate::kernel::services::ports::{
    AssetApi, AssetError, AssetResult, AssetTreeProvider, BoxFuture, CreateFileRequest,
    CreateFolderRequest, CreatedNode,
};
use crate::models::{NodeKind, TreeNode};

#[derive(Default)]
struct Workspace {
    nodes: Vec<TreeNode>,
    contents: FxHashMap<String, Vec<u8>>,
}

#[derive(Default)]
pub struct MemoryAssetService {
    workspaces: Mutex<FxHashMap<String, Workspace>>,
    next_id: AtomicU64,
}

impl MemoryAssetService {
    pub fn new() -> Self {
        Self::default()
    }

    // The map is only touched by single inserts, so a poisoned guard is still
    // consistent.
    fn workspaces(&self) -> MutexGuard<'_, FxHashMap<String, Workspace>> {
        self.workspaces.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_workspace(&self, workspace_id: &str) {
        self.workspaces().entry(workspace_id.to_string()).or_default();
    }

    pub fn file_content(&self, workspace_id: &str, file_id: &str) -> Option<Vec<u8>> {
        let workspaces = self.workspaces();
        workspaces.get(workspace_id)?.contents.get(file_id).cloned()
    }

    fn alloc_id(&self, kind: NodeKind) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        match kind {
            NodeKind::Folder => format!("folder-{}", n),
            NodeKind::File => format!("file-{}", n),
        }
    }

    fn insert(
        &self,
        workspace_id: &str,
        name: String,
        parent_id: Option<String>,
        kind: NodeKind,
        content: Option<Vec<u8>>,
    ) -> AssetResult<CreatedNode> {
        let mut workspaces = self.workspaces();
        let workspace = workspaces
            .get_mut(workspace_id)
            .ok_or_else(|| AssetError::WorkspaceNotFound(workspace_id.to_string()))?;

        if let Some(parent_id) = parent_id.as_deref() {
            let parent = workspace
                .nodes
                .iter()
                .find(|n| n.id == parent_id)
                .ok_or_else(|| AssetError::ParentNotFound(parent_id.to_string()))?;
            if !parent.is_folder() {
                return Err(AssetError::ParentNotFolder(parent_id.to_string()));
            }
        }

        let id = self.alloc_id(kind);
        workspace.nodes.push(TreeNode {
            id: id.clone(),
            name,
            kind,
            parent_id,
        });
        if let Some(content) = content {
            workspace.contents.insert(id.clone(), content);
        }
        Ok(CreatedNode { id })
    }
}

impl AssetTreeProvider for MemoryAssetService {
    fn get_tree<'a>(&'a self, workspace_id: &'a str) -> BoxFuture<'a, AssetResult<Vec<TreeNode>>> {
        Box::pin(async move {
            self.workspaces()
                .get(workspace_id)
                .map(|w| w.nodes.clone())
                .ok_or_else(|| AssetError::WorkspaceNotFound(workspace_id.to_string()))
        })
    }
}

impl AssetApi for MemoryAssetService {
    fn create_folder<'a>(
        &'a self,
        workspace_id: &'a str,
        request: CreateFolderRequest,
    ) -> BoxFuture<'a, AssetResult<CreatedNode>> {
        Box::pin(async move {
            self.insert(
                workspace_id,
                request.name,
                request.parent_id,
                NodeKind::Folder,
                None,
            )
        })
    }

    fn create_file<'a>(
        &'a self,
        workspace_id: &'a str,
        request: CreateFileRequest,
    ) -> BoxFuture<'a, AssetResult<CreatedNode>> {
        Box::pin(async move {
            self.insert(
                workspace_id,
                request.name,
                request.parent_id,
                NodeKind::File,
                Some(request.content),
            )
        })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/memory.rs"]
mod tests;
