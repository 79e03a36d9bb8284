use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::task::JoinSet;

use super::{plan_upload, UploadError, UploadFile, UploadPlan};
use crate::kernel::services::ports::{
    AssetApi, AssetResult, CreateFileRequest, CreateFolderRequest, CreatedNode, UploadSettings,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedFolder {
    pub path: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    /// In creation order.
    pub folders: Vec<CreatedFolder>,
    /// In the order the files were given.
    pub file_ids: Vec<String>,
}

impl UploadReport {
    pub fn folder_id(&self, path: &str) -> Option<&str> {
        self.folders
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.id.as_str())
    }
}

struct FileJob {
    index: usize,
    path: String,
    request: CreateFileRequest,
}

pub struct FolderUploader {
    api: Arc<dyn AssetApi>,
    settings: UploadSettings,
}

impl FolderUploader {
    pub fn new(api: Arc<dyn AssetApi>) -> Self {
        Self::with_settings(api, UploadSettings::default())
    }

    pub fn with_settings(api: Arc<dyn AssetApi>, settings: UploadSettings) -> Self {
        Self { api, settings }
    }

    /// Creates a single folder directly under `target_parent_id`.
    pub async fn create_folder(
        &self,
        workspace_id: &str,
        name: &str,
        target_parent_id: Option<&str>,
    ) -> Result<CreatedNode, UploadError> {
        let name = single_name(name)?;
        self.api
            .create_folder(
                workspace_id,
                CreateFolderRequest {
                    name: name.to_string(),
                    parent_id: target_parent_id.map(str::to_string),
                },
            )
            .await
            .map_err(|source| UploadError::CreateFolder {
                path: name.to_string(),
                source,
            })
    }

    /// Creates a single file directly under `target_parent_id`.
    pub async fn upload_file(
        &self,
        workspace_id: &str,
        name: &str,
        content: Vec<u8>,
        target_parent_id: Option<&str>,
    ) -> Result<CreatedNode, UploadError> {
        let name = single_name(name)?;
        self.api
            .create_file(
                workspace_id,
                CreateFileRequest {
                    name: name.to_string(),
                    parent_id: target_parent_id.map(str::to_string),
                    content,
                },
            )
            .await
            .map_err(|source| UploadError::CreateFile {
                path: name.to_string(),
                source,
            })
    }

    /// Plans and runs a folder upload into `target_parent_id` (`None` = root).
    ///
    /// Fails with the first error encountered. Nothing created before the
    /// failure is rolled back.
    pub async fn plan_and_execute(
        &self,
        workspace_id: &str,
        files: Vec<UploadFile>,
        target_parent_id: Option<&str>,
    ) -> Result<UploadReport, UploadError> {
        let plan = plan_upload(&files)?;
        tracing::info!(
            workspace_id,
            folders = plan.folders.len(),
            files = plan.files.len(),
            "folder upload started"
        );

        let result = self
            .execute(workspace_id, plan, files, target_parent_id)
            .await;
        match &result {
            Ok(report) => tracing::info!(
                workspace_id,
                folders = report.folders.len(),
                files = report.file_ids.len(),
                "folder upload finished"
            ),
            Err(e) => tracing::warn!(workspace_id, error = %e, "folder upload failed"),
        }
        result
    }

    async fn execute(
        &self,
        workspace_id: &str,
        plan: UploadPlan,
        files: Vec<UploadFile>,
        target_parent_id: Option<&str>,
    ) -> Result<UploadReport, UploadError> {
        let target = target_parent_id.map(str::to_string);
        let mut folder_ids: FxHashMap<String, Option<String>> = FxHashMap::default();
        folder_ids.insert(String::new(), target.clone());

        let mut report = UploadReport::default();
        for step in plan.folders {
            let parent_id = folder_ids
                .get(&step.parent_path)
                .cloned()
                .unwrap_or_else(|| target.clone());
            let created = self
                .api
                .create_folder(
                    workspace_id,
                    CreateFolderRequest {
                        name: step.name,
                        parent_id,
                    },
                )
                .await
                .map_err(|source| UploadError::CreateFolder {
                    path: step.path.clone(),
                    source,
                })?;
            tracing::debug!(path = %step.path, id = %created.id, "folder created");
            folder_ids.insert(step.path.clone(), Some(created.id.clone()));
            report.folders.push(CreatedFolder {
                path: step.path,
                id: created.id,
            });
        }

        let mut contents: Vec<Option<Vec<u8>>> =
            files.into_iter().map(|f| Some(f.content)).collect();
        let jobs: Vec<FileJob> = plan
            .files
            .into_iter()
            .map(|step| {
                let parent_id = folder_ids
                    .get(&step.folder_path)
                    .cloned()
                    .unwrap_or_else(|| target.clone());
                let path = if step.folder_path.is_empty() {
                    step.name.clone()
                } else {
                    format!("{}/{}", step.folder_path, step.name)
                };
                FileJob {
                    index: step.index,
                    path,
                    request: CreateFileRequest {
                        name: step.name,
                        parent_id,
                        content: contents
                            .get_mut(step.index)
                            .and_then(Option::take)
                            .unwrap_or_default(),
                    },
                }
            })
            .collect();

        let mut file_ids: Vec<Option<String>> = vec![None; jobs.len()];
        let concurrency = self.settings.effective_file_concurrency();
        if concurrency <= 1 {
            for job in jobs {
                let created = self
                    .api
                    .create_file(workspace_id, job.request)
                    .await
                    .map_err(|source| UploadError::CreateFile {
                        path: job.path,
                        source,
                    })?;
                file_ids[job.index] = Some(created.id);
            }
        } else {
            self.create_files_concurrently(workspace_id, jobs, concurrency, &mut file_ids)
                .await?;
        }

        report.file_ids = file_ids.into_iter().flatten().collect();
        Ok(report)
    }

    // Needs a tokio runtime; the sequential path does not.
    async fn create_files_concurrently(
        &self,
        workspace_id: &str,
        jobs: Vec<FileJob>,
        limit: usize,
        file_ids: &mut [Option<String>],
    ) -> Result<(), UploadError> {
        let mut pending = jobs.into_iter();
        let mut running: JoinSet<(usize, String, AssetResult<CreatedNode>)> = JoinSet::new();

        loop {
            while running.len() < limit {
                let Some(job) = pending.next() else {
                    break;
                };
                let api = Arc::clone(&self.api);
                let workspace_id = workspace_id.to_string();
                running.spawn(async move {
                    let result = api.create_file(&workspace_id, job.request).await;
                    (job.index, job.path, result)
                });
            }

            let Some(joined) = running.join_next().await else {
                return Ok(());
            };
            let failure = match joined {
                Ok((index, _, Ok(created))) => {
                    if let Some(slot) = file_ids.get_mut(index) {
                        *slot = Some(created.id);
                    }
                    continue;
                }
                Ok((_, path, Err(source))) => UploadError::CreateFile { path, source },
                Err(e) => UploadError::Task(e.to_string()),
            };
            // Calls already in flight are left to finish on their own.
            running.detach_all();
            return Err(failure);
        }
    }
}

fn single_name(name: &str) -> Result<&str, UploadError> {
    if name.is_empty() || name.contains('/') || name == "." || name == ".." {
        return Err(UploadError::InvalidPath(name.to_string()));
    }
    Ok(name)
}
