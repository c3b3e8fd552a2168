use std::path::Path;

use crate::{
    infra::{
        self,
        config::{AppConfig, FileConfigAdapter},
        contracts::ConfigAdapter,
        error::AppError,
    },
    usecases::context::AppContext,
};

/// Command-line values that win over file and environment configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub verbose: bool,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.api.timeout_secs = timeout_secs;
        }
        if self.verbose {
            config.logging.level = "debug".to_owned();
        }
    }
}

pub fn bootstrap(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<AppContext, AppError> {
    let adapter = FileConfigAdapter::new(config_path);
    let context = build_context(&adapter, overrides)?;
    infra::logging::init(&context.config.logging)?;

    if let Some(path) = adapter.missing_file() {
        tracing::debug!(path = %path.display(), "config file missing, using defaults");
    }

    Ok(context)
}

fn build_context(
    adapter: &dyn ConfigAdapter,
    overrides: &ConfigOverrides,
) -> Result<AppContext, AppError> {
    let mut config = adapter.load()?;
    overrides.apply(&mut config);

    Ok(AppContext::new(config))
}
