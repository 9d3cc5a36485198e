//! Resolution of template source trees.
//!
//! A [`TemplateDefinition`](crate::templates::TemplateDefinition) only names
//! its source tree (`base_dir`). Where that tree lives is up to a
//! [`TemplateSource`]; [`DirectorySource`] looks under one asset root.

use std::path::{Path, PathBuf};

use crate::error::{Result, StencilError};

/// Locates the source tree of a template.
pub trait TemplateSource {
    /// Resolve a definition's `base_dir` to a directory on disk.
    fn resolve(&self, base_dir: &str) -> Result<PathBuf>;
}

/// Template trees stored under a single root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectorySource {
    fn resolve(&self, base_dir: &str) -> Result<PathBuf> {
        let path = self.root.join(base_dir);
        if path.is_dir() {
            Ok(path)
        } else {
            Err(StencilError::TemplateAssetsNotFound(path))
        }
    }
}
