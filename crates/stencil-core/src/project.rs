//! Project initialization from a named template.
//!
//! [`ProjectInitializer`] ties the pieces together for callers such as the
//! `init` command:
//!
//! 1. look the template up in the [`TemplateRegistry`]
//! 2. resolve its source tree through a [`TemplateSource`]
//! 3. merge caller overrides over the template's default parameters
//! 4. run an [`Instantiator`] into the destination directory
//!
//! Lookup and resolution fail before anything is written, so only the last
//! step can trigger a rollback.

use std::path::Path;

use tracing::info;

use crate::assets::TemplateSource;
use crate::error::Result;
use crate::fs::{Filesystem, LocalFs};
use crate::instantiate::{Instantiation, Instantiator};
use crate::params::ParameterSet;
use crate::templates::{TemplateRegistry, TemplateSummary};

/// Creates new project trees from registry templates.
pub struct ProjectInitializer<'a> {
    registry: &'a TemplateRegistry,
    source: &'a dyn TemplateSource,
    fs: &'a dyn Filesystem,
}

impl<'a> ProjectInitializer<'a> {
    pub fn new(registry: &'a TemplateRegistry, source: &'a dyn TemplateSource) -> Self {
        Self {
            registry,
            source,
            fs: &LocalFs,
        }
    }

    /// Perform destination writes through `fs` instead of the local disk.
    pub fn with_filesystem(mut self, fs: &'a dyn Filesystem) -> Self {
        self.fs = fs;
        self
    }

    pub fn has(&self, template: &str) -> bool {
        self.registry.has(template)
    }

    pub fn list_templates(&self) -> Vec<TemplateSummary<'a>> {
        self.registry.list()
    }

    /// Instantiate `template` into `dest`, which must already exist.
    ///
    /// Returns the template's get-started hint and the creation log. On
    /// failure during the walk, everything created is removed again and the
    /// original error comes back wrapped in
    /// [`StencilError::RolledBack`](crate::error::StencilError::RolledBack).
    pub fn init(
        &self,
        dest: &Path,
        template: &str,
        overrides: Option<&ParameterSet>,
        dry_run: bool,
    ) -> Result<Instantiation> {
        let definition = self.registry.lookup(template)?;
        let source_root = self.source.resolve(&definition.base_dir)?;
        let params = ParameterSet::merge(&definition.params, overrides);

        info!(
            template,
            source = %source_root.display(),
            dest = %dest.display(),
            dry_run,
            "instantiating template"
        );

        Instantiator::new(self.fs)
            .dry_run(dry_run)
            .instantiate(&source_root, dest, definition, &params)
    }
}
