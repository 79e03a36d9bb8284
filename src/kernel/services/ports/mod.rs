//! Service ports: traits + data contracts.

pub mod assets;
pub mod runtime;
pub mod settings;

pub use assets::{
    AssetApi, AssetError, AssetTreeProvider, CreateFileRequest, CreateFolderRequest, CreatedNode,
    Result as AssetResult,
};
pub use runtime::BoxFuture;
pub use settings::{LoggingSettings, Settings, UploadSettings};
