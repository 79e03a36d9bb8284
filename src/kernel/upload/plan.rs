use std::collections::BTreeSet;

use super::{UploadError, UploadFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderStep {
    /// Full slash-joined path, also the key later files resolve against.
    pub path: String,
    pub name: String,
    /// `""` for folders directly under the upload target.
    pub parent_path: String,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStep {
    /// Position of the file in the uploaded batch.
    pub index: usize,
    pub name: String,
    pub folder_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadPlan {
    pub folders: Vec<FolderStep>,
    pub files: Vec<FileStep>,
}

impl UploadPlan {
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

fn split_relative_path(path: &str) -> Result<Vec<&str>, UploadError> {
    if path.ends_with('/') {
        return Err(UploadError::InvalidPath(path.to_string()));
    }
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() || segments.iter().any(|s| *s == "." || *s == "..") {
        return Err(UploadError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

/// Derives the ordered creation plan for `files`.
///
/// Each distinct folder prefix appears exactly once, no matter how many files
/// share it. Folders are ordered by depth so a parent always precedes its
/// children; ties keep lexicographic order.
pub fn plan_upload(files: &[UploadFile]) -> Result<UploadPlan, UploadError> {
    let mut folder_paths: BTreeSet<String> = BTreeSet::new();
    let mut file_steps = Vec::with_capacity(files.len());

    for (index, file) in files.iter().enumerate() {
        let segments = split_relative_path(&file.relative_path)?;
        let Some((name, folders)) = segments.split_last() else {
            return Err(UploadError::InvalidPath(file.relative_path.clone()));
        };

        for depth in 1..=folders.len() {
            folder_paths.insert(folders[..depth].join("/"));
        }
        file_steps.push(FileStep {
            index,
            name: name.to_string(),
            folder_path: folders.join("/"),
        });
    }

    let mut folders: Vec<FolderStep> = folder_paths
        .into_iter()
        .map(|path| {
            let (parent_path, name) = match path.rsplit_once('/') {
                Some((parent, name)) => (parent.to_string(), name.to_string()),
                None => (String::new(), path.clone()),
            };
            let depth = path.split('/').count();
            FolderStep {
                path,
                name,
                parent_path,
                depth,
            }
        })
        .collect();
    folders.sort_by_key(|f| f.depth);

    Ok(UploadPlan {
        folders,
        files: file_steps,
    })
}
