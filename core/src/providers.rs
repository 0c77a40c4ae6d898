use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs::read_to_string,
    path::{Path, PathBuf},
};
use walkdir::{DirEntry, WalkDir};

const PROVIDER_YAML: &str = "provider.yaml";

/// Source of provider metadata.
pub trait PackageDataLoader {
    /// Loads every provider, skipping suspended ones unless `include_suspended` is set.
    fn load(&self, include_suspended: bool) -> Result<Vec<ProviderInfo>>;
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
#[remain::sorted]
pub enum ProviderState {
    NotReady,
    #[default]
    Ready,
    Removed,
    Suspended,
}

/// The contents of one `provider.yaml` file.
///
/// Only the keys the documentation build looks at are typed; everything else is kept in
/// `extra`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ProviderInfo {
    pub package_name: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state: ProviderState,
    // Older files mark suspension with a boolean instead of `state`.
    #[serde(default)]
    suspended: bool,
    #[serde(skip)]
    pub package_dir: PathBuf,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl ProviderInfo {
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended || self.state == ProviderState::Suspended
    }
}

/// Reads `provider.yaml` files from a directory tree.
pub struct ProviderYamlLoader {
    providers_dir: PathBuf,
}

impl ProviderYamlLoader {
    #[must_use]
    pub fn new(providers_dir: impl Into<PathBuf>) -> Self {
        Self {
            providers_dir: providers_dir.into(),
        }
    }

    fn provider_yaml_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.providers_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        {
            let entry = entry?;
            if entry.file_type().is_file() && entry.file_name() == PROVIDER_YAML {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }
}

impl PackageDataLoader for ProviderYamlLoader {
    fn load(&self, include_suspended: bool) -> Result<Vec<ProviderInfo>> {
        if !self.providers_dir.try_exists()? {
            debug!("{:?} does not exist", self.providers_dir);
            return Ok(Vec::new());
        }

        let mut providers = Vec::new();
        for path in self.provider_yaml_paths()? {
            let provider = read_provider_yaml(&path)?;
            if provider.is_suspended() && !include_suspended {
                debug!("Skipping suspended provider `{}`", provider.package_name);
                continue;
            }
            providers.push(provider);
        }

        debug!(
            "Loaded {} providers from {:?} (include_suspended={include_suspended})",
            providers.len(),
            self.providers_dir
        );

        Ok(providers)
    }
}

fn read_provider_yaml(path: &Path) -> Result<ProviderInfo> {
    let contents =
        read_to_string(path).with_context(|| format!("Failed to read `{}`", path.display()))?;
    let mut provider: ProviderInfo = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse `{}`", path.display()))?;
    if let Some(parent) = path.parent() {
        provider.package_dir = parent.to_path_buf();
    }
    Ok(provider)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::{create_dir_all, write};
    use tempfile::{tempdir, TempDir};

    fn provider_yaml(package_name: &str, extra: &str) -> String {
        format!(
            "\
package-name: {package_name}
name: {package_name}
description: Test provider
{extra}
versions:
  - 1.0.0
"
        )
    }

    fn providers_tree() -> TempDir {
        let tempdir = tempdir().unwrap();
        let root = tempdir.path();
        for (dir, contents) in [
            ("amazon", provider_yaml("apache-airflow-providers-amazon", "")),
            (
                "apache/hive",
                provider_yaml("apache-airflow-providers-apache-hive", "state: suspended"),
            ),
            (
                "qubole",
                provider_yaml("apache-airflow-providers-qubole", "suspended: true"),
            ),
            (".cache", provider_yaml("ignored", "")),
        ] {
            create_dir_all(root.join(dir)).unwrap();
            write(root.join(dir).join(PROVIDER_YAML), contents).unwrap();
        }
        tempdir
    }

    fn package_names(providers: &[ProviderInfo]) -> Vec<&str> {
        providers
            .iter()
            .map(|provider| provider.package_name.as_str())
            .collect()
    }

    #[test]
    fn suspended_are_skipped_by_default() {
        let tempdir = providers_tree();
        let loader = ProviderYamlLoader::new(tempdir.path());

        let providers = loader.load(false).unwrap();

        assert_eq!(
            package_names(&providers),
            ["apache-airflow-providers-amazon"]
        );
        assert_eq!(providers[0].package_dir, tempdir.path().join("amazon"));
        assert_eq!(providers[0].state, ProviderState::Ready);
        assert!(providers[0].extra.contains_key("versions"));
    }

    #[test]
    fn include_suspended() {
        let tempdir = providers_tree();
        let loader = ProviderYamlLoader::new(tempdir.path());

        let providers = loader.load(true).unwrap();

        assert_eq!(
            package_names(&providers),
            [
                "apache-airflow-providers-amazon",
                "apache-airflow-providers-apache-hive",
                "apache-airflow-providers-qubole",
            ]
        );
        assert!(providers[1].is_suspended());
        assert!(providers[2].is_suspended());
    }

    #[test]
    fn missing_directory_is_empty() {
        let tempdir = tempdir().unwrap();
        let loader = ProviderYamlLoader::new(tempdir.path().join("providers"));
        assert!(loader.load(true).unwrap().is_empty());
    }

    #[test]
    fn malformed_file_names_path() {
        let tempdir = tempdir().unwrap();
        let dir = tempdir.path().join("broken");
        create_dir_all(&dir).unwrap();
        write(dir.join(PROVIDER_YAML), "name: [unterminated\n").unwrap();

        let error = ProviderYamlLoader::new(tempdir.path())
            .load(false)
            .unwrap_err();

        assert!(error.to_string().starts_with("Failed to parse"), "{error}");
        assert!(error.to_string().contains("broken"), "{error}");
    }
}
