use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Number of directories between an anchor file and the content root.
pub const CONTENT_ROOT_DEPTH: usize = 4;

/// Fixed locations within the documentation project.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DocsPaths {
    pub content_root: PathBuf,
    pub devel_common: PathBuf,
    pub generated: PathBuf,
    pub docs_sources: PathBuf,
}

impl DocsPaths {
    /// Resolves the content root as the directory [`CONTENT_ROOT_DEPTH`] levels above the one
    /// containing `anchor`.
    ///
    /// `anchor` is expected to be a file somewhere inside the project, e.g.,
    /// `<root>/devel-common/src/sphinx_exts/docs_build/code_utils.py`. A relative anchor exactly
    /// that deep resolves to the current directory.
    pub fn from_anchor(anchor: &Path) -> Result<Self> {
        let root = anchor
            .parent()
            .and_then(|dir| dir.ancestors().nth(CONTENT_ROOT_DEPTH))
            .map(|dir| {
                if dir.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    dir
                }
            })
            .ok_or_else(|| {
                anyhow!(
                    "`{}` has no directory {CONTENT_ROOT_DEPTH} levels up",
                    anchor.display()
                )
            })?;
        Self::from_root(root)
    }

    pub fn from_root(root: &Path) -> Result<Self> {
        let content_root = dunce::canonicalize(root)
            .with_context(|| format!("Failed to resolve `{}`", root.display()))?;
        Ok(Self::with_content_root(content_root))
    }

    fn with_content_root(content_root: PathBuf) -> Self {
        let devel_common = content_root.join("devel-common");
        let generated = content_root.join("generated");
        let docs_sources = devel_common.join("src").join("docs");
        Self {
            content_root,
            devel_common,
            generated,
            docs_sources,
        }
    }

    #[must_use]
    pub fn providers_dir(&self) -> PathBuf {
        self.content_root.join("providers")
    }
}
