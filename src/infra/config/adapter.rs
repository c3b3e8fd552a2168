use std::path::{Path, PathBuf};

use crate::infra::{
    config::{load, loader::resolve_path, AppConfig},
    contracts::ConfigAdapter,
    error::AppError,
};

#[derive(Debug, Clone, Default)]
pub struct FileConfigAdapter {
    path: Option<PathBuf>,
}

impl FileConfigAdapter {
    pub fn new(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
        }
    }

    /// The config file this adapter would read, when it does not exist.
    pub fn missing_file(&self) -> Option<PathBuf> {
        resolve_path(self.path.as_deref()).filter(|path| !path.exists())
    }
}

impl ConfigAdapter for FileConfigAdapter {
    fn load(&self) -> Result<AppConfig, AppError> {
        load(self.path.as_deref())
    }
}
