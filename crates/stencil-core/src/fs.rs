//! Filesystem seam for instantiation and rollback.
//!
//! Every mutation an instantiation performs goes through [`Filesystem`], so a
//! run can be pointed at a test double that fails on demand. Reads of the
//! template source tree do not go through this trait.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Destination-side filesystem operations.
///
/// `write_new` and `copy_new` either succeed or leave no file at the target:
/// the instantiator only logs a file once the call has returned `Ok`.
pub trait Filesystem {
    /// Create a single directory. The parent must exist.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Write `contents` to a file that must not exist yet.
    fn write_new(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Copy `from` byte-for-byte to a file that must not exist yet,
    /// carrying over its permissions.
    fn copy_new(&self, from: &Path, to: &Path) -> io::Result<u64>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// The local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create `path` exclusively and hand it to `fill`. If `fill` fails the
    /// new file is removed again before the error is returned.
    fn fill_new<T>(path: &Path, fill: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        match fill(&mut file) {
            Ok(value) => Ok(value),
            Err(err) => {
                drop(file);
                if let Err(cleanup) = fs::remove_file(path) {
                    tracing::warn!(path = %path.display(), error = %cleanup, "could not remove partial file");
                }
                Err(err)
            }
        }
    }
}

impl Filesystem for LocalFs {
    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn write_new(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        use io::Write;

        Self::fill_new(path, |file| {
            file.write_all(contents)?;
            file.flush()
        })
    }

    fn copy_new(&self, from: &Path, to: &Path) -> io::Result<u64> {
        let mut source = File::open(from)?;
        let permissions = source.metadata()?.permissions();
        Self::fill_new(to, |dest| {
            let copied = io::copy(&mut source, dest)?;
            dest.set_permissions(permissions)?;
            Ok(copied)
        })
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }
}
