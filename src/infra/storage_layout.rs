use std::path::PathBuf;

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "deskchat";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub config_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let base = dirs::config_dir().ok_or(AppError::ConfigDirUnresolved)?;

        Ok(Self::under(base))
    }

    pub fn under(base: PathBuf) -> Self {
        Self {
            config_dir: base.join(APP_DIR_NAME),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_is_under_app_dir() {
        let layout = StorageLayout::under(PathBuf::from("/tmp/xdg"));

        assert_eq!(
            layout.config_file(),
            PathBuf::from("/tmp/xdg/deskchat/config.toml")
        );
    }
}
