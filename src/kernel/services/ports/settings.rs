use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSettings {
    /// Files created at once after the folder pass. `1` keeps creation
    /// sequential; `0` is read as `1`.
    #[serde(default = "default_file_concurrency")]
    pub file_concurrency: usize,
}

impl UploadSettings {
    pub fn effective_file_concurrency(&self) -> usize {
        self.file_concurrency.max(1)
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            file_concurrency: default_file_concurrency(),
        }
    }
}

fn default_file_concurrency() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "skill_workbench=info".to_string()
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
