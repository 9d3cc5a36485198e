//! CLI command implementations for stencil.
//!
//! Each module corresponds to a subcommand (`stencil <command>`).

pub mod init;
pub mod list;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stencil_core::config;
use stencil_core::TemplateRegistry;

/// Templates directory of the source checkout this binary was built from.
const BUILD_TEMPLATES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates");

/// Locate the packaged templates when `--templates-dir` is not given.
///
/// Looks next to the installed executable first (`../share/stencil/templates`,
/// then `templates`), and falls back to the build checkout.
pub fn default_templates_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let candidates = exe_dir
        .into_iter()
        .flat_map(|dir| [dir.join("../share/stencil/templates"), dir.join("templates")]);
    first_directory(candidates).unwrap_or_else(|| PathBuf::from(BUILD_TEMPLATES_DIR))
}

fn first_directory(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_dir())
}

/// The builtin catalog, extended by an optional JSON catalog file.
pub fn load_registry(catalog: Option<&Path>) -> Result<TemplateRegistry> {
    let mut registry = TemplateRegistry::builtin();
    if let Some(path) = catalog {
        let definitions = config::load_catalog(path)
            .with_context(|| format!("loading template catalog {}", path.display()))?;
        tracing::debug!(count = definitions.len(), catalog = %path.display(), "loaded catalog");
        registry.extend(definitions);
    }
    Ok(registry)
}
