//! Unified error types for the stencil toolkit.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::rollback::RollbackWarning;

/// Filesystem operation that failed during instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    CreateDir,
    Read,
    Write,
    Copy,
    Walk,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Self::CreateDir => "create directory",
            Self::Read => "read",
            Self::Write => "write",
            Self::Copy => "copy",
            Self::Walk => "walk",
        };
        f.write_str(op)
    }
}

/// A content template could not be rendered.
#[derive(Error, Debug)]
#[error("failed to render {path}: {}", describe_cause(.variable, .message))]
pub struct RenderError {
    /// Template path relative to the template root, always with `/` separators.
    pub path: String,
    /// The undefined variable, when that is what failed.
    pub variable: Option<String>,
    /// Message from the template engine.
    pub message: String,
}

fn describe_cause(variable: &Option<String>, message: &str) -> String {
    match variable {
        Some(var) => format!("undefined variable '{var}' ({message})"),
        None => message.to_string(),
    }
}

/// All errors that can occur during stencil operations.
#[derive(Error, Debug)]
pub enum StencilError {
    // --- Registry ---

    /// The requested template name is not in the catalog.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    /// The asset locator could not find a template's source tree.
    #[error("template assets not found at {0}")]
    TemplateAssetsNotFound(PathBuf),

    // --- Configuration ---

    /// A catalog configuration file was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Template definitions could not be serialized for a catalog file.
    #[error("failed to serialize catalog for {path}")]
    ConfigSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A parameter override is not of the form `key=value`.
    #[error("invalid parameter '{0}' (expected key=value)")]
    InvalidParameter(String),

    // --- Rendering ---

    /// The template engine rejected a template's delimiter overrides.
    #[error("invalid delimiter configuration: {0}")]
    InvalidDelimiters(String),

    /// Rendering a content template failed (undefined variable or bad syntax).
    #[error(transparent)]
    Render(#[from] RenderError),

    // --- Instantiation ---

    /// Creating, reading, writing or copying a path failed.
    #[error("failed to {op} {path}")]
    Filesystem {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The instantiation walk failed and everything it created was removed.
    ///
    /// `source` is the original error, unchanged. `warnings` lists cleanup
    /// steps that could not be completed.
    #[error("instantiation failed and was rolled back")]
    RolledBack {
        #[source]
        source: Box<StencilError>,
        warnings: Vec<RollbackWarning>,
    },

    // --- General ---

    /// A filesystem I/O error outside an instantiation walk.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StencilError {
    pub(crate) fn fs(op: FsOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }

    /// The error that triggered a rollback, or `self` if no rollback happened.
    pub fn cause(&self) -> &StencilError {
        match self {
            Self::RolledBack { source, .. } => source.cause(),
            other => other,
        }
    }

    /// Cleanup failures recorded during rollback.
    pub fn rollback_warnings(&self) -> &[RollbackWarning] {
        match self {
            Self::RolledBack { warnings, .. } => warnings,
            _ => &[],
        }
    }
}

/// Alias for `Result<T, StencilError>`.
pub type Result<T> = std::result::Result<T, StencilError>;
