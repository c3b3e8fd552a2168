use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
    storage_layout::StorageLayout,
};

pub const ENV_BASE_URL: &str = "DESKCHAT_URL";
pub const ENV_TIMEOUT: &str = "DESKCHAT_TIMEOUT";
pub const ENV_TOKEN: &str = "DESKCHAT_TOKEN";
pub const ENV_LOG: &str = "DESKCHAT_LOG";

/// Loads defaults, then the TOML file, then `DESKCHAT_*` environment overrides.
pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    load_with_env(path, |name| env::var(name).ok())
}

pub(crate) fn load_with_env(
    path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::default();

    if let Some(config_path) = resolve_path(path).filter(|config_path| config_path.exists()) {
        load_file(&config_path)?.merge_into(&mut config);
    }

    apply_env_overrides(&mut config, lookup)?;
    Ok(config)
}

/// Explicit path, else the default location when the config dir resolves.
pub(crate) fn resolve_path(path: Option<&Path>) -> Option<PathBuf> {
    match path {
        Some(path) => Some(path.to_path_buf()),
        None => StorageLayout::resolve()
            .ok()
            .map(|layout| layout.config_file()),
    }
}

fn load_file(config_path: &Path) -> Result<FileConfig, AppError> {
    let raw = fs::read_to_string(config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.to_path_buf(),
        source,
    })?;

    toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: config_path.to_path_buf(),
        source,
    })
}

fn apply_env_overrides(
    config: &mut AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), AppError> {
    let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(base_url) = non_blank(ENV_BASE_URL) {
        config.api.base_url = base_url;
    }

    if let Some(raw) = non_blank(ENV_TIMEOUT) {
        config.api.timeout_secs = raw.trim().parse().map_err(|_| AppError::InvalidEnv {
            name: ENV_TIMEOUT,
            value: raw.clone(),
        })?;
    }

    if let Some(token) = non_blank(ENV_TOKEN) {
        config.api.token = Some(token);
    }

    if let Some(level) = non_blank(ENV_LOG) {
        config.logging.level = level;
    }

    Ok(())
}
