// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The handful of filesystem capabilities the pyramid needs, and the
//! depth-first walk that clears out a previous run.  The walk only
//! talks to the [`FileSystem`] trait, so it runs just as well against
//! an in-memory tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, TileError};

/// Directory listing, removal and creation.
pub trait FileSystem: Send + Sync {
    /// The entries directly inside `dir`, in any order.
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// True if `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Create `path` if it doesn't exist yet.  The parent must exist.
    /// An existing directory is not an error.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Create `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Copy, Clone, Debug, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }

    fn is_dir(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        match fs::create_dir(path) {
            Err(ref e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            other => other,
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().map_or(false, |e| e == extension)
}

/// Remove every `*.<extension>` file and every subdirectory beneath
/// `dir`, depth first.  `dir` itself stays.  Other files directly in
/// `dir` are left alone; other files in a subdirectory keep that
/// subdirectory from being removed, and that fails the clear.
pub fn clear_tree(fs: &dyn FileSystem, dir: &Path, extension: &str) -> Result<()> {
    let mut entries = fs.list(dir).map_err(|e| TileError::reset(dir, e))?;
    entries.sort();

    for entry in entries.iter().filter(|p| !fs.is_dir(p)) {
        if has_extension(entry, extension) {
            fs.remove_file(entry)
                .map_err(|e| TileError::reset(entry, e))?;
        }
    }

    for entry in entries.iter().filter(|p| fs.is_dir(p)) {
        clear_tree(fs, entry, extension)?;
        fs.remove_dir(entry)
            .map_err(|e| TileError::reset(entry, e))?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod memory {
    //! A tiny in-memory tree for exercising the traversal.

    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Mutex;

    #[derive(Copy, Clone, Debug, PartialEq)]
    pub enum Node {
        Dir,
        File,
    }

    #[derive(Default)]
    pub struct MemoryFileSystem {
        nodes: Mutex<BTreeMap<PathBuf, Node>>,
        denied: Mutex<BTreeSet<PathBuf>>,
    }

    impl MemoryFileSystem {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_dir<P: AsRef<Path>>(&self, path: P) {
            let mut nodes = self.nodes.lock().unwrap();
            for ancestor in path.as_ref().ancestors() {
                if ancestor.as_os_str().is_empty() {
                    continue;
                }
                nodes.insert(ancestor.to_path_buf(), Node::Dir);
            }
        }

        pub fn add_file<P: AsRef<Path>>(&self, path: P) {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                self.add_dir(parent);
            }
            self.nodes
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), Node::File);
        }

        /// Removing or creating this entry will fail with a permission error.
        pub fn deny<P: AsRef<Path>>(&self, path: P) {
            self.denied
                .lock()
                .unwrap()
                .insert(path.as_ref().to_path_buf());
        }

        pub fn paths(&self) -> Vec<(PathBuf, Node)> {
            self.nodes
                .lock()
                .unwrap()
                .iter()
                .map(|(p, n)| (p.clone(), *n))
                .collect()
        }

        fn check_denied(&self, path: &Path) -> io::Result<()> {
            if self.denied.lock().unwrap().contains(path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            Ok(())
        }

        fn not_found() -> io::Error {
            io::Error::new(io::ErrorKind::NotFound, "no such entry")
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
            let nodes = self.nodes.lock().unwrap();
            if nodes.get(dir) != Some(&Node::Dir) {
                return Err(Self::not_found());
            }
            Ok(nodes
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .cloned()
                .collect())
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.nodes.lock().unwrap().get(path) == Some(&Node::Dir)
        }

        fn remove_file(&self, path: &Path) -> io::Result<()> {
            self.check_denied(path)?;
            let mut nodes = self.nodes.lock().unwrap();
            if nodes.get(path) != Some(&Node::File) {
                return Err(Self::not_found());
            }
            nodes.remove(path);
            Ok(())
        }

        fn remove_dir(&self, path: &Path) -> io::Result<()> {
            self.check_denied(path)?;
            let mut nodes = self.nodes.lock().unwrap();
            if nodes.get(path) != Some(&Node::Dir) {
                return Err(Self::not_found());
            }
            if nodes.keys().any(|p| p.parent() == Some(path)) {
                return Err(io::Error::new(io::ErrorKind::Other, "directory not empty"));
            }
            nodes.remove(path);
            Ok(())
        }

        fn create_dir(&self, path: &Path) -> io::Result<()> {
            self.check_denied(path)?;
            let mut nodes = self.nodes.lock().unwrap();
            match nodes.get(path).cloned() {
                Some(Node::Dir) => return Ok(()),
                Some(Node::File) => {
                    return Err(io::Error::new(io::ErrorKind::AlreadyExists, "file exists"))
                }
                None => {}
            }
            let parent_exists = match path.parent() {
                Some(parent) => {
                    parent.as_os_str().is_empty() || nodes.get(parent) == Some(&Node::Dir)
                }
                None => false,
            };
            if !parent_exists {
                return Err(Self::not_found());
            }
            nodes.insert(path.to_path_buf(), Node::Dir);
            Ok(())
        }

        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            self.add_dir(path);
            Ok(())
        }
    }
}
