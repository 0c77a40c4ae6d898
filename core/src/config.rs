use crate::{DocsPaths, PackageDataLoader, ProviderInfo};
use anyhow::{Context, Result};
use std::{env::var_os, ffi::OsString, path::Path, time::Duration};

pub const SITE_DIRECTORY_ENV: &str = "AIRFLOW_SITE_DIRECTORY";

/// Upper bound consumers place on a single documentation build process.
pub const PROCESS_TIMEOUT: Duration = Duration::from_secs(15 * 60 * 2);

pub const CONSOLE_WIDTH: usize = 250;

/// Configuration shared by the documentation build, loaded once at startup.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    pub paths: DocsPaths,
    /// Empty when [`SITE_DIRECTORY_ENV`] is unset.
    pub site_dir: String,
    pub providers: Vec<ProviderInfo>,
    pub providers_with_suspended: Vec<ProviderInfo>,
}

impl BuildConfig {
    pub fn load(paths: DocsPaths, loader: &dyn PackageDataLoader) -> Result<Self> {
        let providers = loader
            .load(false)
            .context("Failed to load provider data")?;
        let providers_with_suspended = loader
            .load(true)
            .context("Failed to load provider data (including suspended)")?;
        Ok(Self {
            paths,
            site_dir: site_directory_from_env(),
            providers,
            providers_with_suspended,
        })
    }

    #[must_use]
    pub fn site_directory(&self) -> Option<&Path> {
        if self.site_dir.is_empty() {
            None
        } else {
            Some(Path::new(&self.site_dir))
        }
    }
}

#[must_use]
pub fn site_directory_from_env() -> String {
    site_directory_from(var_os(SITE_DIRECTORY_ENV))
}

fn site_directory_from(value: Option<OsString>) -> String {
    value
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_default()
}
