use super::*;
use crate::kernel::services::adapters::MemoryAssetService;
use crate::kernel::services::ports::{
    AssetApi, AssetResult, AssetTreeProvider, BoxFuture, CreateFileRequest, CreateFolderRequest,
    CreatedNode, UploadSettings,
};
use crate::models::AssetTree;
use std::future::Future;
use std::sync::{Arc, Mutex};

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Folder {
        name: String,
        parent_id: Option<String>,
        id: String,
    },
    File {
        name: String,
        parent_id: Option<String>,
        id: String,
    },
}

#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    fail_on: Option<String>,
    panic_on: Option<String>,
}

impl RecordingApi {
    fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Self::default()
        }
    }

    fn panicking_on(name: &str) -> Self {
        Self {
            panic_on: Some(name.to_string()),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(
        &self,
        name: String,
        parent_id: Option<String>,
        folder: bool,
    ) -> AssetResult<CreatedNode> {
        if self.panic_on.as_deref() == Some(name.as_str()) {
            panic!("backend crashed on {}", name);
        }
        if self.fail_on.as_deref() == Some(name.as_str()) {
            return Err(AssetError::Rejected {
                code: "quota_exceeded".to_string(),
                message: "storage quota exceeded".to_string(),
            });
        }
        let mut calls = self.calls.lock().unwrap();
        let id = format!("id-{}", calls.len() + 1);
        calls.push(if folder {
            Call::Folder {
                name,
                parent_id,
                id: id.clone(),
            }
        } else {
            Call::File {
                name,
                parent_id,
                id: id.clone(),
            }
        });
        Ok(CreatedNode { id })
    }
}

impl AssetApi for RecordingApi {
    fn create_folder<'a>(
        &'a self,
        _workspace_id: &'a str,
        request: CreateFolderRequest,
    ) -> BoxFuture<'a, AssetResult<CreatedNode>> {
        Box::pin(async move { self.record(request.name, request.parent_id, true) })
    }

    fn create_file<'a>(
        &'a self,
        _workspace_id: &'a str,
        request: CreateFileRequest,
    ) -> BoxFuture<'a, AssetResult<CreatedNode>> {
        Box::pin(async move { self.record(request.name, request.parent_id, false) })
    }
}

fn files(paths: &[&str]) -> Vec<UploadFile> {
    paths.iter().map(|p| UploadFile::new(*p, p.as_bytes())).collect()
}

fn folder_calls(calls: &[Call]) -> Vec<(String, Option<String>)> {
    calls
        .iter()
        .filter_map(|c| match c {
            Call::Folder { name, parent_id, .. } => Some((name.clone(), parent_id.clone())),
            Call::File { .. } => None,
        })
        .collect()
}

#[test]
fn plan_collects_distinct_prefixes_by_depth() {
    let plan = plan_upload(&files(&["a/b/c/z.txt", "a/x.txt", "a/b/y.txt"])).unwrap();
    let folders: Vec<&str> = plan.folders.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(folders, vec!["a", "a/b", "a/b/c"]);
    assert_eq!(plan.folders[2].name, "c");
    assert_eq!(plan.folders[2].parent_path, "a/b");
    assert_eq!(plan.folders[0].parent_path, "");

    let file_folders: Vec<(&str, &str)> = plan
        .files
        .iter()
        .map(|f| (f.name.as_str(), f.folder_path.as_str()))
        .collect();
    assert_eq!(
        file_folders,
        vec![("z.txt", "a/b/c"), ("x.txt", "a"), ("y.txt", "a/b")]
    );
}

#[test]
fn plan_orders_parents_before_children_across_branches() {
    let plan = plan_upload(&files(&["z/deep/er/f", "b/g", "a/h"])).unwrap();
    let folders: Vec<&str> = plan.folders.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(folders, vec!["a", "b", "z", "z/deep", "z/deep/er"]);
}

#[test]
fn plan_without_folders_only_has_files() {
    let plan = plan_upload(&files(&["one.txt", "two.txt"])).unwrap();
    assert!(plan.folders.is_empty());
    assert_eq!(plan.files.len(), 2);
    assert!(plan.files.iter().all(|f| f.folder_path.is_empty()));
}

#[test]
fn plan_rejects_paths_without_a_file_name() {
    for bad in ["", "a/", "/", "a/../b.txt", "./x"] {
        let err = plan_upload(&files(&[bad])).unwrap_err();
        assert!(matches!(err, UploadError::InvalidPath(_)), "{:?}", bad);
    }
}

#[test]
fn plan_ignores_empty_segments() {
    let plan = plan_upload(&files(&["/a//b.txt"])).unwrap();
    let folders: Vec<&str> = plan.folders.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(folders, vec!["a"]);
    assert_eq!(plan.files[0].name, "b.txt");
}

#[test]
fn nested_upload_creates_folders_in_depth_order_and_routes_files() {
    let api = Arc::new(RecordingApi::default());
    let uploader = FolderUploader::new(api.clone());

    let report = block_on(uploader.plan_and_execute(
        "app-1",
        files(&["a/x.txt", "a/b/y.txt", "a/b/c/z.txt"]),
        None,
    ))
    .unwrap();

    let calls = api.calls();
    assert_eq!(
        folder_calls(&calls),
        vec![
            ("a".to_string(), None),
            ("b".to_string(), Some("id-1".to_string())),
            ("c".to_string(), Some("id-2".to_string())),
        ]
    );
    assert_eq!(
        &calls[3..],
        &[
            Call::File {
                name: "x.txt".to_string(),
                parent_id: Some("id-1".to_string()),
                id: "id-4".to_string(),
            },
            Call::File {
                name: "y.txt".to_string(),
                parent_id: Some("id-2".to_string()),
                id: "id-5".to_string(),
            },
            Call::File {
                name: "z.txt".to_string(),
                parent_id: Some("id-3".to_string()),
                id: "id-6".to_string(),
            },
        ]
    );
    assert_eq!(report.folder_id("a/b"), Some("id-2"));
    assert_eq!(report.file_ids, vec!["id-4", "id-5", "id-6"]);
}

#[test]
fn shared_folder_is_created_once() {
    let api = Arc::new(RecordingApi::default());
    let uploader = FolderUploader::new(api.clone());

    block_on(uploader.plan_and_execute("app-1", files(&["a/x.txt", "a/y.txt"]), None)).unwrap();

    let calls = api.calls();
    assert_eq!(folder_calls(&calls), vec![("a".to_string(), None)]);
    assert_eq!(calls.len(), 3);
}

#[test]
fn top_level_folders_and_files_use_target_parent() {
    let api = Arc::new(RecordingApi::default());
    let uploader = FolderUploader::new(api.clone());

    block_on(uploader.plan_and_execute("app-1", files(&["top.txt", "a/x.txt"]), Some("target")))
        .unwrap();

    let calls = api.calls();
    assert_eq!(
        folder_calls(&calls),
        vec![("a".to_string(), Some("target".to_string()))]
    );
    assert!(calls.contains(&Call::File {
        name: "top.txt".to_string(),
        parent_id: Some("target".to_string()),
        id: "id-2".to_string(),
    }));
}

#[test]
fn folder_failure_stops_before_any_file_and_keeps_created_folders() {
    let api = Arc::new(RecordingApi::failing_on("b"));
    let uploader = FolderUploader::new(api.clone());

    let err = block_on(uploader.plan_and_execute(
        "app-1",
        files(&["a/x.txt", "a/b/y.txt"]),
        None,
    ))
    .unwrap_err();

    match &err {
        UploadError::CreateFolder { path, source } => {
            assert_eq!(path, "a/b");
            assert!(matches!(source, AssetError::Rejected { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(folder_calls(&api.calls()), vec![("a".to_string(), None)]);
    assert_eq!(api.calls().len(), 1);
}

#[test]
fn file_failure_aborts_remaining_files() {
    let api = Arc::new(RecordingApi::failing_on("y.txt"));
    let uploader = FolderUploader::new(api.clone());

    let err = block_on(uploader.plan_and_execute(
        "app-1",
        files(&["a/x.txt", "a/y.txt", "a/z.txt"]),
        None,
    ))
    .unwrap_err();

    assert!(matches!(err, UploadError::CreateFile { ref path, .. } if path == "a/y.txt"));
    let names: Vec<String> = api
        .calls()
        .into_iter()
        .map(|c| match c {
            Call::Folder { name, .. } | Call::File { name, .. } => name,
        })
        .collect();
    assert_eq!(names, vec!["a", "x.txt"]);
}

#[test]
fn invalid_path_fails_before_any_call() {
    let api = Arc::new(RecordingApi::default());
    let uploader = FolderUploader::new(api.clone());

    let err = block_on(uploader.plan_and_execute("app-1", files(&["a/ok.txt", "bad/"]), None))
        .unwrap_err();

    assert!(matches!(err, UploadError::InvalidPath(_)));
    assert!(api.calls().is_empty());
}

#[test]
fn concurrent_file_creation_still_routes_every_file() {
    let api = Arc::new(RecordingApi::default());
    let uploader = FolderUploader::with_settings(
        api.clone(),
        UploadSettings {
            file_concurrency: 4,
        },
    );

    let report = block_on(uploader.plan_and_execute(
        "app-1",
        files(&["a/1.txt", "a/2.txt", "a/b/3.txt", "4.txt", "a/b/5.txt"]),
        None,
    ))
    .unwrap();

    let calls = api.calls();
    assert_eq!(folder_calls(&calls).len(), 2);
    // Every folder call precedes every file call.
    let first_file = calls
        .iter()
        .position(|c| matches!(c, Call::File { .. }))
        .unwrap();
    assert_eq!(first_file, 2);
    assert_eq!(report.file_ids.len(), 5);

    let a = report.folder_id("a").unwrap().to_string();
    let b = report.folder_id("a/b").unwrap().to_string();
    for call in &calls[2..] {
        if let Call::File { name, parent_id, .. } = call {
            let expected = match name.as_str() {
                "1.txt" | "2.txt" => Some(a.clone()),
                "3.txt" | "5.txt" => Some(b.clone()),
                _ => None,
            };
            assert_eq!(parent_id, &expected, "{}", name);
        }
    }
}

fn call_names(calls: &[Call]) -> Vec<String> {
    calls
        .iter()
        .map(|c| match c {
            Call::Folder { name, .. } | Call::File { name, .. } => name.clone(),
        })
        .collect()
}

#[test]
fn concurrent_file_failure_aborts_with_one_error() {
    let api = Arc::new(RecordingApi::failing_on("2.txt"));
    let uploader = FolderUploader::with_settings(
        api.clone(),
        UploadSettings {
            file_concurrency: 2,
        },
    );

    let err = block_on(uploader.plan_and_execute(
        "app-1",
        files(&["a/1.txt", "a/2.txt", "a/3.txt", "a/4.txt", "a/5.txt", "a/6.txt"]),
        None,
    ))
    .unwrap_err();

    match &err {
        UploadError::CreateFile { path, source } => {
            assert_eq!(path, "a/2.txt");
            assert!(matches!(source, AssetError::Rejected { .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "failed to create file a/2.txt: rejected (quota_exceeded): storage quota exceeded"
    );

    // At most one slot refills before the failure is seen.
    let names = call_names(&api.calls());
    assert_eq!(names[0], "a");
    for late in ["4.txt", "5.txt", "6.txt"] {
        assert!(!names.contains(&late.to_string()), "{} was issued", late);
    }
}

#[test]
fn panicking_file_task_surfaces_as_task_error() {
    let api = Arc::new(RecordingApi::panicking_on("1.txt"));
    let uploader = FolderUploader::with_settings(
        api.clone(),
        UploadSettings {
            file_concurrency: 2,
        },
    );

    let err = block_on(uploader.plan_and_execute("app-1", files(&["a/1.txt"]), None))
        .unwrap_err();

    assert!(matches!(err, UploadError::Task(_)), "{err:?}");
    assert!(std::error::Error::source(&err).is_none());
    assert_eq!(call_names(&api.calls()), vec!["a"]);
}

#[test]
fn single_file_and_folder_bypass_planning() {
    let api = Arc::new(RecordingApi::default());
    let uploader = FolderUploader::new(api.clone());

    let folder = block_on(uploader.create_folder("app-1", "assets", Some("p"))).unwrap();
    let file =
        block_on(uploader.upload_file("app-1", "a.txt", b"hi".to_vec(), Some("p"))).unwrap();

    assert_eq!(folder.id, "id-1");
    assert_eq!(file.id, "id-2");
    assert_eq!(
        api.calls(),
        vec![
            Call::Folder {
                name: "assets".to_string(),
                parent_id: Some("p".to_string()),
                id: "id-1".to_string(),
            },
            Call::File {
                name: "a.txt".to_string(),
                parent_id: Some("p".to_string()),
                id: "id-2".to_string(),
            },
        ]
    );

    let err = block_on(uploader.upload_file("app-1", "a/b.txt", Vec::new(), None)).unwrap_err();
    assert!(matches!(err, UploadError::InvalidPath(_)));
}

#[test]
fn upload_into_memory_backend_rebuilds_tree() {
    let backend = Arc::new(MemoryAssetService::new());
    backend.add_workspace("app-1");
    let uploader = FolderUploader::new(backend.clone());

    block_on(uploader.plan_and_execute(
        "app-1",
        files(&["docs/images/logo.png", "docs/readme.md", "skill.md"]),
        None,
    ))
    .unwrap();

    let nodes = block_on(backend.get_tree("app-1")).unwrap();
    let tree = AssetTree::from_nodes(nodes).unwrap();
    let mut paths: Vec<String> = tree
        .nodes()
        .iter()
        .filter(|n| !n.is_folder())
        .filter_map(|n| tree.path_of(&n.id))
        .collect();
    paths.sort();
    assert_eq!(
        paths,
        vec!["docs/images/logo.png", "docs/readme.md", "skill.md"]
    );
}
