//! Data models shared by the kernel.

pub mod asset_tree;

pub use asset_tree::{AssetTree, AssetTreeError, NodeKind, TreeNode};
