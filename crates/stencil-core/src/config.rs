//! Catalog configuration files.
//!
//! A catalog file is a JSON array of template definitions:
//!
//! ```json
//! [
//!   {
//!     "name": "hello:go",
//!     "help": "A minimal Go component.",
//!     "base_dir": "hello/go",
//!     "params": { "appname": "hello", "realm": "realm1" },
//!     "verbatim": ["go.sum"]
//!   }
//! ]
//! ```
//!
//! Loaded definitions are merged into a registry with
//! [`TemplateRegistry::extend`](crate::templates::TemplateRegistry::extend).

use std::path::Path;

use crate::error::{FsOp, Result, StencilError};
use crate::templates::TemplateDefinition;

/// Load template definitions from a JSON catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<TemplateDefinition>> {
    let contents = std::fs::read_to_string(path).map_err(|e| StencilError::ConfigNotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| StencilError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write template definitions to a JSON catalog file.
pub fn save_catalog(path: &Path, definitions: &[TemplateDefinition]) -> Result<()> {
    let json =
        serde_json::to_string_pretty(definitions).map_err(|e| StencilError::ConfigSerialize {
            path: path.to_path_buf(),
            source: e,
        })?;
    std::fs::write(path, json).map_err(|e| StencilError::fs(FsOp::Write, path, e))
}
