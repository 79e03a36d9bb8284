//! Read-only index over the folder/file hierarchy of a workspace.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "node_type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl TreeNode {
    pub fn folder(id: &str, name: &str, parent_id: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: NodeKind::Folder,
            parent_id: parent_id.map(str::to_string),
        }
    }

    pub fn file(id: &str, name: &str, parent_id: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: NodeKind::File,
            parent_id: parent_id.map(str::to_string),
        }
    }

    pub fn is_folder(&self) -> bool {
        match self.kind {
            NodeKind::Folder => true,
            NodeKind::File => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetTreeError {
    DuplicateId(String),
    MissingParent { id: String, parent_id: String },
    ParentNotFolder { id: String, parent_id: String },
    Cycle(String),
}

impl fmt::Display for AssetTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetTreeError::DuplicateId(id) => write!(f, "duplicate node id: {}", id),
            AssetTreeError::MissingParent { id, parent_id } => {
                write!(f, "node {} refers to missing parent {}", id, parent_id)
            }
            AssetTreeError::ParentNotFolder { id, parent_id } => {
                write!(f, "node {} has non-folder parent {}", id, parent_id)
            }
            AssetTreeError::Cycle(id) => write!(f, "node {} is part of a cycle", id),
        }
    }
}

impl std::error::Error for AssetTreeError {}

/// A validated forest of [`TreeNode`]s.
#[derive(Debug, Clone, Default)]
pub struct AssetTree {
    nodes: Vec<TreeNode>,
    index: FxHashMap<String, usize>,
    children: FxHashMap<Option<String>, Vec<usize>>,
}

impl AssetTree {
    pub fn from_nodes(nodes: Vec<TreeNode>) -> Result<Self, AssetTreeError> {
        let mut index = FxHashMap::default();
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(AssetTreeError::DuplicateId(node.id.clone()));
            }
        }

        let mut children: FxHashMap<Option<String>, Vec<usize>> = FxHashMap::default();
        for (i, node) in nodes.iter().enumerate() {
            if let Some(parent_id) = node.parent_id.as_deref() {
                let Some(&parent) = index.get(parent_id) else {
                    return Err(AssetTreeError::MissingParent {
                        id: node.id.clone(),
                        parent_id: parent_id.to_string(),
                    });
                };
                if !nodes[parent].is_folder() {
                    return Err(AssetTreeError::ParentNotFolder {
                        id: node.id.clone(),
                        parent_id: parent_id.to_string(),
                    });
                }
            }
            children.entry(node.parent_id.clone()).or_default().push(i);
        }

        let tree = Self {
            nodes,
            index,
            children,
        };
        tree.check_acyclic()?;
        Ok(tree)
    }

    // Every node must reach a root within `len` parent hops.
    fn check_acyclic(&self) -> Result<(), AssetTreeError> {
        let limit = self.nodes.len();
        for node in &self.nodes {
            let mut current = node;
            let mut hops = 0usize;
            while let Some(parent) = current.parent_id.as_deref().and_then(|p| self.node(p)) {
                hops += 1;
                if hops > limit {
                    return Err(AssetTreeError::Cycle(node.id.clone()));
                }
                current = parent;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&TreeNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Children of `parent_id` (`None` = workspace root), in provider order.
    pub fn children(&self, parent_id: Option<&str>) -> impl Iterator<Item = &TreeNode> {
        self.children
            .get(&parent_id.map(str::to_string))
            .into_iter()
            .flatten()
            .map(|&i| &self.nodes[i])
    }

    /// Folder ids above `id`, ordered from the root down. Empty for unknown ids
    /// and top-level nodes.
    pub fn ancestor_folder_ids(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut current = self.node(id);
        while let Some(parent) = current
            .and_then(|n| n.parent_id.as_deref())
            .and_then(|p| self.node(p))
        {
            out.push(parent.id.clone());
            current = Some(parent);
        }
        out.reverse();
        out
    }

    /// Slash-joined names from the root to `id`.
    pub fn path_of(&self, id: &str) -> Option<String> {
        let node = self.node(id)?;
        let mut names: Vec<&str> = self
            .ancestor_folder_ids(id)
            .iter()
            .filter_map(|a| self.node(a).map(|n| n.name.as_str()))
            .collect();
        names.push(node.name.as_str());
        Some(names.join("/"))
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/asset_tree.rs"]
mod tests;
