//! Service adapters: concrete implementations of the ports (IO/async).

pub mod memory;
pub mod settings;

pub use memory::MemoryAssetService;
pub use settings::{
    ensure_log_dir, ensure_settings_file, get_log_dir, get_settings_path, load_default_settings,
    load_settings,
};
