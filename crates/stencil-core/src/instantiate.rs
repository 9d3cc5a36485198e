//! Transactional instantiation of a template source tree.
//!
//! [`Instantiator::instantiate`] walks the source tree top-down. Directory
//! and file names get the `appname` substitution; file contents are rendered
//! unless the substituted base name is listed as verbatim, in which case the
//! bytes are copied unchanged. Compiled bytecode (`.pyc`) is skipped entirely.
//!
//! Every creation is logged in a [`CreationLog`]. If anything fails, the log
//! is rolled back and the original error is returned inside
//! [`StencilError::RolledBack`] together with any cleanup warnings.
//!
//! A dry run performs the same walk, rendering included, but never touches
//! the destination. Its creation log describes what a real run would create.

use std::path::Path;

use tracing::{debug, error, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::{FsOp, Result, StencilError};
use crate::fs::Filesystem;
use crate::params::ParameterSet;
use crate::rollback::{CreationLog, CreationRecord, EntryKind};
use crate::templates::renderer::{render_path, to_template_name, TemplateRenderer};
use crate::templates::TemplateDefinition;

/// File suffixes that are never copied into a new project.
pub const SKIPPED_SUFFIXES: &[&str] = &[".pyc"];

/// Outcome of a successful instantiation.
#[derive(Debug, Clone)]
pub struct Instantiation {
    /// The template's get-started hint, if it has one.
    pub hint: Option<String>,
    /// Everything created, in creation order. For a dry run, everything that
    /// would have been created.
    pub created: Vec<CreationRecord>,
}

/// Drives one copy-and-render pass from a source tree into a destination.
pub struct Instantiator<'a> {
    fs: &'a dyn Filesystem,
    dry_run: bool,
}

impl<'a> Instantiator<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs, dry_run: false }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Instantiate `definition` from `source_root` into `dest_root`.
    ///
    /// `dest_root` must already exist and is not itself logged.
    pub fn instantiate(
        &self,
        source_root: &Path,
        dest_root: &Path,
        definition: &TemplateDefinition,
        params: &ParameterSet,
    ) -> Result<Instantiation> {
        let source_root = std::path::absolute(source_root)?;
        let dest_root = std::path::absolute(dest_root)?;
        let renderer = TemplateRenderer::for_delimiters(definition.delimiters.as_ref())?
            .with_root(&source_root);

        let mut log = CreationLog::new();
        let walk = Walk {
            fs: self.fs,
            dry_run: self.dry_run,
            source_root: &source_root,
            dest_root: &dest_root,
            definition,
            params,
            renderer: &renderer,
        };

        match walk.run(&mut log) {
            Ok(()) => Ok(Instantiation {
                hint: definition.get_started_hint.clone(),
                created: log.into_records(),
            }),
            Err(err) => {
                error!(error = %err, template = %definition.name, "error encountered, rolling back");
                let warnings = log.rollback(self.fs, self.dry_run);
                Err(StencilError::RolledBack {
                    source: Box::new(err),
                    warnings,
                })
            }
        }
    }
}

struct Walk<'w> {
    fs: &'w dyn Filesystem,
    dry_run: bool,
    source_root: &'w Path,
    dest_root: &'w Path,
    definition: &'w TemplateDefinition,
    params: &'w ParameterSet,
    renderer: &'w TemplateRenderer,
}

impl Walk<'_> {
    fn run(&self, log: &mut CreationLog) -> Result<()> {
        for entry in WalkDir::new(self.source_root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(self.source_root).to_path_buf();
                StencilError::fs(FsOp::Walk, path, e.into())
            })?;

            let rel = self.template_name(&entry)?;
            let target = self.dest_root.join(render_path(&rel, self.params));

            if is_directory(&entry) {
                self.create_dir(&target, log)?;
            } else if is_skipped(&rel) {
                debug!(path = %entry.path().display(), "skipping compiled file");
            } else {
                self.create_file(&entry, &rel, &target, log)?;
            }
        }
        Ok(())
    }

    /// Path relative to the source root, `/`-separated.
    fn template_name(&self, entry: &DirEntry) -> Result<String> {
        let rel = entry.path().strip_prefix(self.source_root).map_err(|e| {
            StencilError::fs(FsOp::Walk, entry.path(), std::io::Error::other(e))
        })?;
        Ok(to_template_name(rel))
    }

    fn create_dir(&self, target: &Path, log: &mut CreationLog) -> Result<()> {
        info!(path = %target.display(), dry_run = self.dry_run, "creating directory");
        if !self.dry_run {
            self.fs
                .create_dir(target)
                .map_err(|e| StencilError::fs(FsOp::CreateDir, target, e))?;
        }
        log.record(EntryKind::Directory, target);
        Ok(())
    }

    fn create_file(
        &self,
        entry: &DirEntry,
        rel: &str,
        target: &Path,
        log: &mut CreationLog,
    ) -> Result<()> {
        let source = entry.path();
        let file_name = render_path(&entry.file_name().to_string_lossy(), self.params);
        info!(path = %target.display(), dry_run = self.dry_run, "creating file");

        if self.definition.is_verbatim(&file_name) {
            debug!(path = %source.display(), "copying verbatim");
            if !self.dry_run {
                self.fs
                    .copy_new(source, target)
                    .map_err(|e| StencilError::fs(FsOp::Copy, target, e))?;
            }
        } else {
            let text = std::fs::read_to_string(source)
                .map_err(|e| StencilError::fs(FsOp::Read, source, e))?;
            let rendered = self.renderer.render(rel, &text, self.params)?;
            if !self.dry_run {
                self.fs
                    .write_new(target, rendered.as_bytes())
                    .map_err(|e| StencilError::fs(FsOp::Write, target, e))?;
            }
        }

        log.record(EntryKind::File, target);
        Ok(())
    }
}

/// Directories, including symlinks to directories. Links are not followed,
/// so a linked directory is created empty.
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn is_skipped(rel: &str) -> bool {
    SKIPPED_SUFFIXES.iter().any(|suffix| rel.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFs;
    use std::fs;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn hello_params() -> ParameterSet {
        ParameterSet::new()
            .with("appname", "hello")
            .with("realm", "realm1")
    }

    #[test]
    fn test_instantiate_renders_tree() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        write(src.path(), "appname/appname.py", "REALM = '{{ realm }}'\n");
        write(src.path(), "web/index.html", "<title>{{ appname }}</title>\n");

        let def = TemplateDefinition::new("t", "t", "t").with_hint("run it");
        let result = Instantiator::new(&LocalFs)
            .instantiate(src.path(), dest.path(), &def, &hello_params())
            .unwrap();

        assert_eq!(result.hint.as_deref(), Some("run it"));
        assert_eq!(
            fs::read_to_string(dest.path().join("hello/hello.py")).unwrap(),
            "REALM = 'realm1'\n"
        );
        assert_eq!(
            fs::read_to_string(dest.path().join("web/index.html")).unwrap(),
            "<title>hello</title>\n"
        );
        assert_eq!(result.created.len(), 4);
    }

    #[test]
    fn test_parent_logged_before_children() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        write(src.path(), "a/b/c.txt", "c");
        write(src.path(), "a/d.txt", "d");

        let def = TemplateDefinition::new("t", "t", "t");
        let result = Instantiator::new(&LocalFs)
            .instantiate(src.path(), dest.path(), &def, &ParameterSet::new())
            .unwrap();

        for (i, record) in result.created.iter().enumerate() {
            if let Some(parent) = record.path.parent() {
                if parent == dest.path() {
                    continue;
                }
                let parent_index = result
                    .created
                    .iter()
                    .position(|r| r.path == parent)
                    .unwrap();
                assert!(parent_index < i);
                assert_eq!(result.created[parent_index].kind, EntryKind::Directory);
            }
        }
    }

    #[test]
    fn test_bytecode_is_skipped() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        write(src.path(), "app/main.py", "print('hi')\n");
        write(src.path(), "app/main.pyc", "\u{0}garbage {{ nope");

        let def = TemplateDefinition::new("t", "t", "t");
        let result = Instantiator::new(&LocalFs)
            .instantiate(src.path(), dest.path(), &def, &ParameterSet::new())
            .unwrap();

        assert!(dest.path().join("app/main.py").exists());
        assert!(!dest.path().join("app/main.pyc").exists());
        assert_eq!(result.created.len(), 2);
    }

    #[test]
    fn test_existing_directory_fails_and_keeps_it() {
        let src = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        write(src.path(), "a.txt", "a");
        write(src.path(), "web/index.html", "i");
        fs::create_dir(dest.path().join("web")).unwrap();

        let def = TemplateDefinition::new("t", "t", "t");
        let err = Instantiator::new(&LocalFs)
            .instantiate(src.path(), dest.path(), &def, &ParameterSet::new())
            .unwrap_err();

        match err.cause() {
            StencilError::Filesystem { op, source, .. } => {
                assert_eq!(*op, FsOp::CreateDir);
                assert_eq!(source.kind(), std::io::ErrorKind::AlreadyExists);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dest.path().join("a.txt").exists());
        assert!(dest.path().join("web").is_dir());
    }

    #[test]
    fn test_is_skipped() {
        assert!(is_skipped("app/__init__.pyc"));
        assert!(!is_skipped("app/__init__.py"));
    }
}
