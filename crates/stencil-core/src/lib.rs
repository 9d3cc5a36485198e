//! Core library for the stencil toolkit.
//!
//! Instantiates a new project tree from a named, parameterized template: the
//! template's source directory is copied into a destination, with parameters
//! substituted into path names and file contents. A failure partway through
//! leaves no partial output behind.
//!
//! The pieces, leaves first:
//! - [`templates::TemplateRegistry`]: the catalog of [`templates::TemplateDefinition`]s
//! - [`params::ParameterSet`]: default/override parameter merge
//! - [`templates::renderer`]: content and path rendering with per-template delimiters
//! - [`rollback::CreationLog`]: creation log and best-effort rollback
//! - [`instantiate::Instantiator`]: the transactional tree walk
//! - [`project::ProjectInitializer`]: lookup, asset resolution and instantiation in one call

pub mod assets;
pub mod config;
pub mod error;
pub mod fs;
pub mod instantiate;
pub mod params;
pub mod project;
pub mod rollback;
pub mod templates;

pub use error::{Result, StencilError};
pub use instantiate::Instantiation;
pub use params::ParameterSet;
pub use project::ProjectInitializer;
pub use templates::{TemplateDefinition, TemplateRegistry};
